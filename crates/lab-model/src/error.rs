use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("value for {parameter} is not a finite number")]
    NonFiniteValue { parameter: String },
    #[error("invalid parameter values: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LabError>;
