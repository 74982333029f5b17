//! onthisday runtime: request handling and hosted-model access.
//!
//! The runtime is organized around these concepts:
//!
//! - **EventsHandler**: validates a tool invocation's date argument, builds
//!   the prompt, and formats the model's reply.
//! - **Completion**: a trait abstracting hosted text-completion backends.
//! - **HuggingFaceBackend**: the Hugging Face Inference API adapter.
//!
//! # Example
//!
//! ```ignore
//! use runtime::{EventsHandler, HuggingFaceBackend};
//!
//! # async fn example() -> runtime::Result<()> {
//! let backend = HuggingFaceBackend::builder("hf_...", "google/gemma-3-27b-it").build();
//! let handler = EventsHandler::new(backend);
//!
//! let result = handler
//!     .handle(serde_json::json!({"date": "2001-09-11"}))
//!     .await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
pub mod model;
pub mod providers;

pub use error::{Error, Result};
pub use handler::{EventsHandler, EventsRequest};
pub use model::{Completion, ModelError};
pub use providers::{HuggingFaceBackend, HuggingFaceBackendBuilder};
