//! Digest assembly: ordered concatenation plus the `+`/`/` substitution.

use serde::Serialize;

use super::field::{FieldName, FIELD_TABLE};

/// One encoded field, before substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedField {
    pub name: FieldName,
    pub value: String,
}

impl EncodedField {
    pub fn new(name: FieldName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Concatenate `fields` in table order and apply the character substitution.
///
/// Fields are looked up by name, so the slice order does not matter. A field
/// missing from the slice contributes nothing.
pub fn assemble(fields: &[EncodedField]) -> String {
    let joined: String = FIELD_TABLE
        .iter()
        .filter_map(|descriptor| fields.iter().find(|f| f.name == descriptor.name))
        .map(|f| f.value.as_str())
        .collect();

    substitute(&joined)
}

/// Replace every `+` with `G` and every `/` with `D`.
///
/// Runs over the whole concatenation, never per field.
pub fn substitute(joined: &str) -> String {
    joined
        .chars()
        .map(|c| match c {
            '+' => 'G',
            '/' => 'D',
            other => other,
        })
        .collect()
}
