// Prompt composition for edit requests

use crate::styles::{self, HeadshotStyle};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    #[error("Please upload a reference image for the Face Swap.")]
    MissingReference,

    #[error("Please enter a custom instruction for the edit.")]
    MissingInstruction,
}

/// Instruction block for face swaps. The model is told to take composition,
/// background, lighting, clothing and pose from the reference image and
/// facial identity from the source image.
const FACE_SWAP_PROMPT: &str = r#"[STRICT ADHERENCE REQUIRED]
Primary Goal: Face Swap.
Reference Image (Second Image): This defines the target composition. You MUST copy the exact background, lighting, clothing, pose, and environment from this image.
Face Source (First Image): This defines the facial identity.
Action: Replace the face in the Reference Image with the face from the Face Source.
Constraints:
- Keep the background 100% identical to the Reference Image.
- Keep the clothing and pose 100% identical to the Reference Image.
- Match the skin tone and lighting of the face to the Reference Image's environment.
- The resulting face must be recognizable as the person in the First Image."#;

/// Build the instruction string for an edit request.
///
/// Pure and synchronous. Face swap requires a reference image; the custom
/// style requires non-empty free text. Presets use their template, with the
/// user's extra text appended after a single space when present.
pub fn compose(
    style: HeadshotStyle,
    free_text: &str,
    has_reference: bool,
) -> Result<String, ComposeError> {
    let extra = free_text.trim();

    match style {
        HeadshotStyle::FaceSwap => {
            if !has_reference {
                return Err(ComposeError::MissingReference);
            }

            let mut prompt = FACE_SWAP_PROMPT.to_string();
            if !extra.is_empty() {
                prompt.push_str("\nAdditional Instructions: ");
                prompt.push_str(extra);
            }
            Ok(prompt)
        }
        HeadshotStyle::Custom => {
            if extra.is_empty() {
                return Err(ComposeError::MissingInstruction);
            }
            Ok(extra.to_string())
        }
        preset => {
            let template = styles::lookup(preset)
                .map(|s| s.prompt_template)
                .unwrap_or_default();

            if extra.is_empty() {
                Ok(template.to_string())
            } else {
                Ok(format!("{} {}", template, extra))
            }
        }
    }
}
