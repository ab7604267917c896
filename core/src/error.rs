use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Distribution error: {0}")]
    Distribution(String),
}

impl EstimateError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type EstimateResult<T> = Result<T, EstimateError>;
