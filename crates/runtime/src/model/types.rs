use super::errors::ModelError;
use std::future::Future;

/// Trait for hosted text-completion backends.
///
/// A backend is an opaque function from prompt to generated text. The
/// request handler stays provider-agnostic behind this seam, which also
/// allows a local stub in tests.
pub trait Completion: Send + Sync {
    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}
