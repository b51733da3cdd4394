//! Task-description drafting through a Gemini-style `generateContent` API.
//!
//! [`DescriptionGenerator`] builds the prompt, enumerates the models the
//! credential can reach and sweeps model/version pairs until one answers.

pub mod api;
pub mod config;
pub mod fallback;
pub mod generator;
pub mod prompt;

pub use api::{GeminiApi, GeminiApiError, ModelInfo};
pub use config::GenerationConfig;
pub use fallback::{Attempt, GenerationTransport};
pub use generator::{DescriptionGenerator, GenerationError};
