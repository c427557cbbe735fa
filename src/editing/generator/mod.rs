// Image generators - the external collaborator that turns (images, instruction) into a new image

mod echo;
mod gemini;

pub use echo::EchoGenerator;
pub use gemini::GeminiGenerator;

use super::types::ImageData;
use async_trait::async_trait;
use std::sync::Arc;

/// One call to an image generator
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Image parts in send order; a style reference, if any, comes first
    pub images: Vec<Arc<ImageData>>,
    pub instruction: String,
}

impl GenerationRequest {
    pub fn new(image: Arc<ImageData>, instruction: impl Into<String>) -> Self {
        Self {
            images: vec![image],
            instruction: instruction.into(),
        }
    }

    /// Put a reference image in front of the edit target
    pub fn with_reference(mut self, reference: Arc<ImageData>) -> Self {
        self.images.insert(0, reference);
        self
    }

    /// The image being edited, always the last image part
    pub fn target(&self) -> Option<&Arc<ImageData>> {
        self.images.last()
    }
}

/// Base trait for image generation backends
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Produce exactly one image for the request
    async fn generate(&self, request: &GenerationRequest) -> Result<ImageData, GeneratorError>;

    /// Short backend name for logs
    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("The generator did not return an image{}", .0.as_deref().map(|r| format!(": {}", r)).unwrap_or_default())]
    NoImage(Option<String>),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
