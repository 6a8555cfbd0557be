use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Model backend credential is not configured")]
    MissingCredential,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid prompt template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid")]
    Invalid,

    #[error("Internal server error")]
    InternalServerError,
}
