//! Transport-level errors.

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl StoreError {
    /// The HTTP status of a non-success response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Api(status, _) => Some(*status),
            _ => None,
        }
    }
}
