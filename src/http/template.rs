use std::collections::BTreeMap;

use crate::script::VariableStore;

/// Replaces `{{name}}` placeholders with variables from `vars`.
///
/// Names are trimmed before lookup. Unknown placeholders and unterminated
/// `{{` are copied through untouched.
#[must_use]
pub fn render_template(input: &str, vars: &VariableStore) -> String {
    let mut rest = input;
    let mut output = String::with_capacity(input.len());

    loop {
        let Some(start) = rest.find("{{") else {
            output.push_str(rest);
            break;
        };
        let (before, after_start) = rest.split_at(start);
        output.push_str(before);
        let Some(after) = after_start.strip_prefix("{{") else {
            output.push_str(after_start);
            break;
        };
        let Some(end) = after.find("}}") else {
            output.push_str(after_start);
            break;
        };
        let (key_part, after_end) = after.split_at(end);
        match vars.text(key_part.trim()) {
            Some(value) => output.push_str(&value),
            None => {
                output.push_str("{{");
                output.push_str(key_part);
                output.push_str("}}");
            }
        }
        let Some(remaining) = after_end.strip_prefix("}}") else {
            break;
        };
        rest = remaining;
    }

    output
}

/// Applies [`render_template`] to every value, keeping keys as they are.
#[must_use]
pub fn render_map(
    templates: &BTreeMap<String, String>,
    vars: &VariableStore,
) -> BTreeMap<String, String> {
    templates
        .iter()
        .map(|(key, value)| (key.clone(), render_template(value, vars)))
        .collect()
}
