use crate::model::ModelError;
use thiserror::Error;

/// Errors from handling a tool invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// The invocation carried a missing or malformed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The hosted model call failed.
    #[error("failed to get events: {0}")]
    Upstream(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, Error>;
