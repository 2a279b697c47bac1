use thiserror::Error;

/// Client-fault errors raised while turning a submission into a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Le consentement est requis")]
    ConsentRequired,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
