// Error types for the Gemini client

use thiserror::Error;

/// Result type for Gemini API operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No content generated")]
    Empty,

    #[error("Model returned text instead of image: {0}")]
    TextResponse(String),

    #[error("Model response did not contain an image.")]
    NoImage,
}
