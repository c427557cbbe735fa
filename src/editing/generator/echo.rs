// Echo generator - offline backend that hands the edit target straight back

use super::{GenerationRequest, GeneratorError, ImageGenerator};
use crate::editing::types::ImageData;
use async_trait::async_trait;

/// Returns the target image unchanged; useful for dry runs without an API key
pub struct EchoGenerator {}

impl EchoGenerator {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for EchoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerator for EchoGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<ImageData, GeneratorError> {
        tracing::debug!("Echo generator: {}", request.instruction);
        request
            .target()
            .map(|image| image.as_ref().clone())
            .ok_or(GeneratorError::NoImage(None))
    }

    fn name(&self) -> &str {
        "echo"
    }
}
