// ProShot - AI headshot and selfie edit studio
// Composes styled edit prompts and requests edited images from Gemini

pub mod config;
pub mod intake;
pub mod prompt;
pub mod session;
pub mod styles;

pub use config::Config;
pub use intake::{IntakeError, UploadedImage};
pub use prompt::ComposeError;
pub use session::{EditBackend, GeneratedResult, Session};
pub use styles::{HEADSHOT_STYLES, HeadshotStyle, StyleOption};
