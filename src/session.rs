// Session state and action handlers for the edit workflow

use crate::intake::UploadedImage;
use crate::prompt;
use crate::styles::{self, HeadshotStyle};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gemini::GeminiError;
use std::sync::Arc;

/// Remote editing capability the session depends on.
/// `gemini::Client` is the production implementation; tests use doubles.
#[async_trait]
pub trait EditBackend: Send + Sync {
    /// Request an edit; resolves to the base64 payload of the edited image
    async fn edit_image(
        &self,
        source_data: &str,
        source_mime: &str,
        reference: Option<(&str, &str)>,
        prompt: &str,
    ) -> Result<String, GeminiError>;

    /// Produce a random editing instruction; resolves to a fallback on failure
    async fn random_edit_prompt(&self) -> String;
}

#[async_trait]
impl EditBackend for gemini::Client {
    async fn edit_image(
        &self,
        source_data: &str,
        source_mime: &str,
        reference: Option<(&str, &str)>,
        prompt: &str,
    ) -> Result<String, GeminiError> {
        gemini::Client::edit_image(self, source_data, source_mime, reference, prompt).await
    }

    async fn random_edit_prompt(&self) -> String {
        gemini::Client::random_edit_prompt(self).await
    }
}

/// An edited image returned by the remote model
#[derive(Debug, Clone)]
pub struct GeneratedResult {
    /// Timestamp-derived token, also used for save filenames
    pub id: String,
    /// Base64 image payload
    pub data: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedResult {
    fn new(label: String, data: String) -> Self {
        let created_at = Utc::now();
        Self {
            id: created_at.timestamp_millis().to_string(),
            data,
            label,
            created_at,
        }
    }

    /// data: URI for the generated image
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.data)
    }
}

/// Interactive editing session.
///
/// All state lives here and is mutated only through the named actions
/// below; the remote calls go through the [`EditBackend`] seam.
pub struct Session {
    backend: Arc<dyn EditBackend>,
    source: Option<UploadedImage>,
    reference: Option<UploadedImage>,
    style: HeadshotStyle,
    free_text: String,
    generating: bool,
    randomizing: bool,
    results: Vec<GeneratedResult>,
    error: Option<String>,
}

impl Session {
    pub fn new(backend: Arc<dyn EditBackend>) -> Self {
        Self {
            backend,
            source: None,
            reference: None,
            style: HeadshotStyle::Corporate,
            free_text: String::new(),
            generating: false,
            randomizing: false,
            results: Vec::new(),
            error: None,
        }
    }

    pub fn source(&self) -> Option<&UploadedImage> {
        self.source.as_ref()
    }

    pub fn reference(&self) -> Option<&UploadedImage> {
        self.reference.as_ref()
    }

    pub fn style(&self) -> HeadshotStyle {
        self.style
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    pub fn generating(&self) -> bool {
        self.generating
    }

    pub fn randomizing(&self) -> bool {
        self.randomizing
    }

    /// Generated results, newest first
    pub fn results(&self) -> &[GeneratedResult] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn select_style(&mut self, style: HeadshotStyle) {
        self.style = style;
    }

    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
    }

    pub fn upload_source(&mut self, image: UploadedImage) {
        self.source = Some(image);
        self.error = None;
    }

    /// Dropping the source also discards everything generated from it
    pub fn clear_source(&mut self) {
        self.source = None;
        self.results.clear();
        self.error = None;
    }

    pub fn upload_reference(&mut self, image: UploadedImage) {
        self.reference = Some(image);
        self.error = None;
    }

    pub fn clear_reference(&mut self) {
        self.reference = None;
    }

    /// Fill the free-text instruction with a model-suggested edit
    pub async fn randomize_prompt(&mut self) {
        self.randomizing = true;
        self.error = None;
        self.free_text = self.backend.random_edit_prompt().await;
        self.randomizing = false;
    }

    /// Compose the prompt and request an edit from the remote model.
    ///
    /// No-op without a source image or while a generation is in flight.
    /// Composer failures set the error message without touching the
    /// network; remote failures set it after the call. A successful
    /// result is prepended to the history.
    pub async fn generate(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        if self.generating {
            return;
        }

        self.generating = true;
        self.error = None;

        let prompt = match prompt::compose(self.style, &self.free_text, self.reference.is_some()) {
            Ok(prompt) => prompt,
            Err(e) => {
                self.error = Some(e.to_string());
                self.generating = false;
                return;
            }
        };

        // The reference image only participates in face swaps
        let reference = match self.style {
            HeadshotStyle::FaceSwap => self.reference.clone(),
            _ => None,
        };
        let reference_parts = reference
            .as_ref()
            .map(|r| (r.data.as_str(), r.mime_type.as_str()));

        match self
            .backend
            .edit_image(&source.data, &source.mime_type, reference_parts, &prompt)
            .await
        {
            Ok(data) => {
                let result = GeneratedResult::new(self.result_label(), data);
                tracing::info!("Generated result {} ({})", result.id, result.label);
                self.results.insert(0, result);
            }
            Err(e) => {
                tracing::warn!("Generation failed: {}", e);
                self.error = Some(e.to_string());
            }
        }

        self.generating = false;
    }

    fn result_label(&self) -> String {
        let extra = !self.free_text.is_empty();
        match self.style {
            HeadshotStyle::Custom => self.free_text.clone(),
            HeadshotStyle::FaceSwap => {
                if extra {
                    "Face Swap + Custom".to_string()
                } else {
                    "Face Swap".to_string()
                }
            }
            preset => {
                let label = styles::lookup(preset).map(|s| s.label).unwrap_or("Unknown");
                if extra {
                    format!("{} + Custom", label)
                } else {
                    label.to_string()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockBackend {
        image: std::sync::Mutex<Option<String>>,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn returning(data: &str) -> Arc<Self> {
            Arc::new(Self {
                image: std::sync::Mutex::new(Some(data.to_string())),
                calls: AtomicUsize::new(0),
            })
        }

        fn set_failing(&self) {
            *self.image.lock().unwrap() = None;
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EditBackend for MockBackend {
        async fn edit_image(
            &self,
            _source_data: &str,
            _source_mime: &str,
            _reference: Option<(&str, &str)>,
            _prompt: &str,
        ) -> Result<String, GeminiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.image.lock().unwrap().clone() {
                Some(data) => Ok(data),
                None => Err(GeminiError::NoImage),
            }
        }

        async fn random_edit_prompt(&self) -> String {
            "Blur the background.".to_string()
        }
    }

    fn selfie() -> UploadedImage {
        intake::ingest_bytes(b"selfie", "image/jpeg").unwrap()
    }

    #[tokio::test]
    async fn generate_prepends_result_with_preset_label() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend.clone());

        session.upload_source(selfie());
        session.select_style(HeadshotStyle::Corporate);
        session.generate().await;

        assert_eq!(backend.calls(), 1);
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].label, "Corporate");
        assert_eq!(session.results()[0].data, "XYZ");
        assert!(session.error().is_none());
        assert!(!session.generating());
    }

    #[tokio::test]
    async fn newest_result_comes_first() {
        let backend = MockBackend::returning("ABC");
        let mut session = Session::new(backend.clone());
        session.upload_source(selfie());

        session.generate().await;
        session.set_free_text("add a tie");
        session.generate().await;

        assert_eq!(session.results().len(), 2);
        assert_eq!(session.results()[0].label, "Corporate + Custom");
        assert_eq!(session.results()[1].label, "Corporate");
    }

    #[tokio::test]
    async fn face_swap_without_reference_makes_no_call() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend.clone());

        session.upload_source(selfie());
        session.select_style(HeadshotStyle::FaceSwap);
        session.generate().await;

        assert_eq!(backend.calls(), 0);
        assert_eq!(
            session.error(),
            Some("Please upload a reference image for the Face Swap.")
        );
        assert!(session.results().is_empty());
    }

    #[tokio::test]
    async fn custom_style_without_text_makes_no_call() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend.clone());

        session.upload_source(selfie());
        session.select_style(HeadshotStyle::Custom);
        session.generate().await;

        assert_eq!(backend.calls(), 0);
        assert_eq!(
            session.error(),
            Some("Please enter a custom instruction for the edit.")
        );
    }

    #[tokio::test]
    async fn generate_without_source_is_a_no_op() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend.clone());

        session.generate().await;

        assert_eq!(backend.calls(), 0);
        assert!(session.results().is_empty());
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn failed_generation_sets_error_and_keeps_history() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend.clone());
        session.upload_source(selfie());
        session.generate().await;
        assert_eq!(session.results().len(), 1);

        backend.set_failing();
        session.generate().await;

        assert_eq!(backend.calls(), 2);
        assert_eq!(
            session.error(),
            Some("Model response did not contain an image.")
        );
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].data, "XYZ");
    }

    #[tokio::test]
    async fn selecting_the_same_style_repeatedly_changes_nothing_else() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend);

        session.upload_source(selfie());
        session.set_free_text("warmer light");
        session.generate().await;

        for _ in 0..3 {
            session.select_style(HeadshotStyle::Corporate);
        }

        assert_eq!(session.style(), HeadshotStyle::Corporate);
        assert_eq!(session.free_text(), "warmer light");
        assert!(session.source().is_some());
        assert_eq!(session.results().len(), 1);
    }

    #[tokio::test]
    async fn clearing_source_discards_results() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend);

        session.upload_source(selfie());
        session.generate().await;
        assert_eq!(session.results().len(), 1);

        session.clear_source();

        assert!(session.source().is_none());
        assert!(session.results().is_empty());
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn clearing_reference_keeps_everything_else() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend);

        session.upload_source(selfie());
        session.upload_reference(selfie());
        session.generate().await;

        session.clear_reference();

        assert!(session.reference().is_none());
        assert!(session.source().is_some());
        assert_eq!(session.results().len(), 1);
    }

    #[tokio::test]
    async fn new_upload_clears_error() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend);

        session.upload_source(selfie());
        session.select_style(HeadshotStyle::FaceSwap);
        session.generate().await;
        assert!(session.error().is_some());

        session.upload_source(selfie());
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn randomize_fills_free_text() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend);

        session.randomize_prompt().await;

        assert_eq!(session.free_text(), "Blur the background.");
        assert!(!session.randomizing());
    }

    #[tokio::test]
    async fn custom_result_label_is_the_instruction() {
        let backend = MockBackend::returning("XYZ");
        let mut session = Session::new(backend);

        session.upload_source(selfie());
        session.select_style(HeadshotStyle::Custom);
        session.set_free_text("Make it black and white");
        session.generate().await;

        assert_eq!(session.results()[0].label, "Make it black and white");
    }

    #[tokio::test]
    async fn face_swap_with_reference_calls_backend() {
        let backend = MockBackend::returning("SWAPPED");
        let mut session = Session::new(backend.clone());

        session.upload_source(selfie());
        session.upload_reference(selfie());
        session.select_style(HeadshotStyle::FaceSwap);
        session.generate().await;

        assert_eq!(backend.calls(), 1);
        assert_eq!(session.results()[0].label, "Face Swap");
        assert_eq!(session.results()[0].data, "SWAPPED");
    }
}
