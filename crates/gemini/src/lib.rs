// Gemini generateContent API client
// Wraps the image-edit and text-generation calls used by the studio

mod client;
pub mod error;
pub mod wire;

pub use client::Client;
pub use error::{GeminiError, Result};
