use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::AssistantError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// A text-in, text-out generative model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str, max_output_tokens: u32)
    -> Result<String, AssistantError>;
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            temperature: 0.7,
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| AssistantError::Network(format!("failed to build http client: {err}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn upstream_error(status: reqwest::StatusCode, body: &str) -> AssistantError {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Gemini API ошибка: {}", status.as_u16()));

        AssistantError::Upstream {
            status: status.as_u16(),
            message,
        }
    }
}

/// Text of the first part of the first candidate, if any.
fn first_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.trim().is_empty())
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, AssistantError> {
        if self.config.api_key.trim().is_empty() {
            return Err(AssistantError::MissingApiKey);
        }

        tracing::debug!(model = %self.config.model, max_output_tokens, "calling Gemini");

        let request = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| AssistantError::Network(format!("network error while calling Gemini: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AssistantError::Network(format!("failed reading Gemini response: {err}")))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Gemini request failed");
            return Err(Self::upstream_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|err| AssistantError::InvalidPayload(format!("invalid Gemini payload: {err}")))?;

        first_text(parsed).ok_or(AssistantError::EmptyReply)
    }
}
