//! Hosted-model completion trait and error types.

pub mod errors;
pub mod types;

pub use errors::ModelError;
pub use types::Completion;
