use serde_json::Value;

use crate::args::BodyKind;
use crate::config::BodySpec;
use crate::error::BodyError;
use crate::script::value_to_text;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";

/// Serialized request body plus the content type it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Encodes a configured body according to its kind.
///
/// # Errors
///
/// Returns a [`BodyError`] when the payload shape does not fit the kind
/// (a form body that is not a map, an xml/raw body that is not a string) or
/// the kind is not recognised.
pub fn encode_body(spec: &BodySpec) -> Result<EncodedBody, BodyError> {
    match &spec.kind {
        BodyKind::Json => {
            let bytes =
                serde_json::to_vec(&spec.payload).map_err(|source| BodyError::Json { source })?;
            Ok(EncodedBody {
                bytes,
                content_type: CONTENT_TYPE_JSON,
            })
        }
        BodyKind::Form => {
            let Value::Object(fields) = &spec.payload else {
                return Err(BodyError::FormNotMap);
            };
            let mut serializer = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in fields {
                serializer.append_pair(key, &value_to_text(value));
            }
            Ok(EncodedBody {
                bytes: serializer.finish().into_bytes(),
                content_type: CONTENT_TYPE_FORM,
            })
        }
        BodyKind::Xml => match &spec.payload {
            Value::String(text) => Ok(EncodedBody {
                bytes: text.clone().into_bytes(),
                content_type: CONTENT_TYPE_XML,
            }),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                Err(BodyError::XmlNotString)
            }
        },
        BodyKind::Raw => match &spec.payload {
            Value::String(text) => Ok(EncodedBody {
                bytes: text.clone().into_bytes(),
                content_type: CONTENT_TYPE_TEXT,
            }),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
                Err(BodyError::RawNotString)
            }
        },
        BodyKind::Other(value) => Err(BodyError::UnsupportedType {
            value: value.clone(),
        }),
    }
}
