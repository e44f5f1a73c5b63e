use thiserror::Error;

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("failed to marshal JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("form body must be a map")]
    FormNotMap,
    #[error("xml body must be a string")]
    XmlNotString,
    #[error("raw body must be a string")]
    RawNotString,
    #[error("unsupported body type: {value}")]
    UnsupportedType { value: String },
}
