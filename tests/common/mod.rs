#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use smartmama::{
    AppState, Config,
    config::{GeminiSettings, ObservabilityConfig, ServerConfig},
};
use smartmama_assistant::{AssistantError, LanguageModel};
use tower::ServiceExt;

/// Canned model outcome.
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Upstream(u16, String),
    MissingKey,
}

/// Language model fake that returns a fixed reply and remembers every prompt.
pub struct ScriptedModel {
    reply: Reply,
    pub prompts: Mutex<Vec<(String, u32)>>,
}

impl ScriptedModel {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::new(Reply::Text(text.to_owned()))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> (String, u32) {
        self.prompts.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, AssistantError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_owned(), max_output_tokens));

        match &self.reply {
            Reply::Text(text) => Ok(text.to_owned()),
            Reply::Upstream(status, message) => Err(AssistantError::Upstream {
                status: *status,
                message: message.to_owned(),
            }),
            Reply::MissingKey => Err(AssistantError::MissingApiKey),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        gemini: GeminiSettings::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub fn create_test_app(model: Arc<ScriptedModel>) -> Router {
    smartmama::router(AppState {
        config: test_config(),
        model,
    })
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap();

    read_json(response).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, value)
}
