pub mod client;
pub mod error;
pub mod types;

pub use client::{GeminiClient, TextGenerator};
pub use error::GeminiError;
