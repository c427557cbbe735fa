// Gemini generator - multimodal generateContent call returning one inline image

use super::{GenerationRequest, GeneratorError, ImageGenerator};
use crate::config::GeneratorConfig;
use crate::editing::types::ImageData;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the hosted Gemini image model
pub struct GeminiGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(config: GeneratorConfig, api_key: impl Into<String>) -> Result<Self, GeneratorError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeneratorError::ConfigError("API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GeneratorError::ConfigError(e.to_string()))?;

        Ok(Self {
            config,
            client,
            api_key,
        })
    }

    /// Create a client whose key is read from the environment variable named in the config
    pub fn from_env(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            GeneratorError::ConfigError(format!("{} is not set", config.api_key_env))
        })?;
        Self::new(config, api_key)
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ImageGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<ImageData, GeneratorError> {
        let body = build_request(request);

        tracing::debug!(
            "Calling {} with {} image part(s)",
            self.config.model,
            request.images.len()
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorEnvelope>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_default();
            return Err(GeneratorError::ApiError(format!("{} {}", status, detail).trim().to_string()));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::ParseError(e.to_string()))?;

        extract_image(parsed)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
    let mut parts: Vec<Part> = request
        .images
        .iter()
        .map(|image| Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.to_base64(),
            }),
        })
        .collect();
    parts.push(Part {
        text: Some(request.instruction.clone()),
        inline_data: None,
    });

    GenerateContentRequest {
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
        },
    }
}

fn extract_image(response: GenerateContentResponse) -> Result<ImageData, GeneratorError> {
    let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GeneratorError::NoImage(block_reason));
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if let Some(inline) = parts.iter().find_map(|p| p.inline_data.as_ref()) {
        return ImageData::from_base64(inline.mime_type.clone(), &inline.data)
            .map_err(|e| GeneratorError::ParseError(e.to_string()));
    }

    let reason = candidate
        .finish_reason
        .or(block_reason)
        .or_else(|| parts.into_iter().find_map(|p| p.text));
    Err(GeneratorError::NoImage(reason))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}
