use thiserror::Error;

/// Errors surfaced to the user by the interaction flows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input rejected before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// The remote service answered with a failure or could not be reached.
    #[error("{0}")]
    RequestFailed(String),

    /// The health endpoint could not be reached or reported a failure.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl Error {
    /// The message shown to the user.
    pub fn message(&self) -> &str {
        match self {
            Error::Validation(m) | Error::RequestFailed(m) | Error::ServiceUnavailable(m) => m,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
