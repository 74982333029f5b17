//! Hosted model providers.
//!
//! Each provider implements the completion trait for its specific API.

mod huggingface;

pub use huggingface::{EMPTY_REPLY_TEXT, HuggingFaceBackend, HuggingFaceBackendBuilder};
