use thiserror::Error;

/// Errors from hosted-model calls.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The request body could not be serialized.
    #[error("serialize: {0}")]
    Serialize(String),

    /// A network error occurred during the API call (connect, timeout, read).
    #[error("network: {0}")]
    Network(String),

    /// The provider returned a non-200 status. Carries the raw body for
    /// diagnostics.
    #[error("provider api {status}: {body}")]
    Api { status: u16, body: String },

    /// The provider response could not be parsed.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}
