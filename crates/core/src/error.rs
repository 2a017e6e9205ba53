use thiserror::Error;

/// A record failed schema validation before reaching the store.
///
/// Carries the offending field and a human-readable reason; the server
/// surfaces this verbatim inside the `Invalid data: ...` 400 body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, "required field is missing")
    }
}
