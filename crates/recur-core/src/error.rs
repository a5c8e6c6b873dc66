use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported recurrence type: '{0}'")]
    UnsupportedRecurrenceType(String),

    #[error("Malformed recurrence field '{field}': {value}")]
    MalformedRuleField { field: &'static str, value: String },

    #[error("Date out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid date format: '{0}'")]
    InvalidDateFormat(String),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        CoreError::MalformedRuleField {
            field,
            value: value.into(),
        }
    }
}
