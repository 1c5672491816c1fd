// Wire types for the generateContent endpoint
// Field names follow the REST API's camelCase JSON

use crate::error::{GeminiError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    pub response_modalities: Vec<String>,
}

impl GenerationConfig {
    /// Config for calls expected to return an image alongside optional text
    pub fn images() -> Self {
        Self {
            response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// One element of a request or response content.
/// Exactly one of `text` / `inline_data` is set in practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// Base64 image payload embedded in a content part
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Parts of the first candidate, when the model produced any content
    pub fn parts(&self) -> Option<&[Part]> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
    }
}

/// Scan parts in order and return the first inline image payload.
/// A text-only response surfaces the model's own explanation as the error.
pub fn first_image(parts: &[Part]) -> Result<String> {
    for part in parts {
        if let Some(inline) = &part.inline_data {
            if !inline.data.is_empty() {
                return Ok(inline.data.clone());
            }
        }
    }

    if let Some(text) = parts.iter().find_map(|p| p.text.as_deref()) {
        return Err(GeminiError::TextResponse(text.to_string()));
    }

    Err(GeminiError::NoImage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_image_returns_inline_payload() {
        let parts = vec![Part::image("image/png", "ABC")];
        assert_eq!(first_image(&parts).unwrap(), "ABC");
    }

    #[test]
    fn first_image_skips_leading_text() {
        let parts = vec![Part::text("Here you go:"), Part::image("image/png", "XYZ")];
        assert_eq!(first_image(&parts).unwrap(), "XYZ");
    }

    #[test]
    fn text_only_response_surfaces_model_text() {
        let parts = vec![Part::text("sorry")];
        let err = first_image(&parts).unwrap_err();
        assert!(matches!(err, GeminiError::TextResponse(_)));
        assert!(err.to_string().contains("sorry"));
    }

    #[test]
    fn empty_parts_yield_no_image_error() {
        let err = first_image(&[]).unwrap_err();
        assert!(matches!(err, GeminiError::NoImage));
    }

    #[test]
    fn request_serializes_with_camel_case_fields() {
        let request = GenerateRequest {
            contents: vec![Content::user(vec![
                Part::image("image/jpeg", "c291cmNl"),
                Part::image("image/png", "cmVm"),
                Part::text("make it pop"),
            ])],
            generation_config: Some(GenerationConfig::images()),
        };

        let json = serde_json::to_value(&request).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "c291cmNl");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[2]["text"], "make it pop");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn response_deserializes_inline_data() {
        let json = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "ABC"}}]
                }
            }]
        });

        let response: GenerateResponse = serde_json::from_value(json).unwrap();
        let parts = response.parts().unwrap();
        assert_eq!(first_image(parts).unwrap(), "ABC");
    }

    #[test]
    fn response_without_candidates_has_no_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.parts().is_none());
    }
}
