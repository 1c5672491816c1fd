// HTTP client for the Generative Language API

use crate::error::{GeminiError, Result};
use crate::wire::{self, Content, GenerateRequest, GenerateResponse, GenerationConfig, Part};

/// Default endpoint for the Generative Language API
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model for image editing
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Default model for text generation
const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Returned when the model answers the random-prompt request with empty text
const EMPTY_RESPONSE_FALLBACK: &str = "Enhance brightness and contrast.";

/// Returned when the random-prompt call fails outright
const FAILURE_FALLBACK: &str = "Improve lighting and smooth skin.";

const RANDOM_PROMPT_REQUEST: &str = r#"Generate a single short, natural language instruction for editing a photo.
The instruction MUST be based on a random combination of 1 to 3 of these specific features:
Crop, Straighten, Brightness, Contrast, Exposure, Shadows, Highlights, White Balance, Sharpness, Clarity, Vibrance, Saturation, Retouch, Blemish, Smooth, Blur, Background, Vignette, Resize.

Examples:
- "Increase brightness and add a vignette."
- "Smooth the skin and blur the background."
- "Crop closer to the face and increase clarity."
- "Fix the white balance to be warmer and sharpen details."
- "Retouch blemishes and slightly increase saturation."

Return ONLY the instruction text, no quotes."#;

/// Gemini API client
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    image_model: String,
    text_model: String,
}

impl Client {
    /// Create a new client against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
        }
    }

    /// Override the API endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the image and text models
    pub fn with_models(
        mut self,
        image_model: impl Into<String>,
        text_model: impl Into<String>,
    ) -> Self {
        self.image_model = image_model.into();
        self.text_model = text_model.into();
        self
    }

    /// Edit an image according to a text instruction.
    ///
    /// Part order is contractual for the model: the source image defines
    /// facial identity, an optional reference image defines composition,
    /// and the instruction comes last. Returns the base64 payload of the
    /// first image part in the response.
    pub async fn edit_image(
        &self,
        source_data: &str,
        source_mime: &str,
        reference: Option<(&str, &str)>,
        prompt: &str,
    ) -> Result<String> {
        let mut parts = vec![Part::image(source_mime, source_data)];
        if let Some((data, mime)) = reference {
            parts.push(Part::image(mime, data));
        }
        parts.push(Part::text(prompt));

        let request = GenerateRequest {
            contents: vec![Content::user(parts)],
            generation_config: Some(GenerationConfig::images()),
        };

        let response = self.generate(&self.image_model, &request).await?;
        let parts = response.parts().ok_or(GeminiError::Empty)?;
        wire::first_image(parts)
    }

    /// Ask the text model for a random editing instruction.
    ///
    /// Never fails: an empty answer and a failed call each resolve to a
    /// fixed fallback instruction.
    pub async fn random_edit_prompt(&self) -> String {
        match self.generate_text(RANDOM_PROMPT_REQUEST).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    EMPTY_RESPONSE_FALLBACK.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(e) => {
                tracing::warn!("Random prompt request failed: {}", e);
                FAILURE_FALLBACK.to_string()
            }
        }
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content::user(vec![Part::text(prompt)])],
            generation_config: None,
        };

        let response = self.generate(&self.text_model, &request).await?;
        let text = response
            .parts()
            .unwrap_or(&[])
            .iter()
            .find_map(|p| p.text.clone())
            .unwrap_or_default();
        Ok(text)
    }

    async fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))
    }
}
