use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use smartmama_assistant::{
    CHAT_MAX_OUTPUT_TOKENS, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig, PLAN_MAX_OUTPUT_TOKENS,
};
use std::{env, time::Duration};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiSettings {
    /// Empty means generation and chat answer with a configuration error.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_plan_max_output_tokens")]
    pub plan_max_output_tokens: u32,
    #[serde(default = "default_chat_max_output_tokens")]
    pub chat_max_output_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            plan_max_output_tokens: default_plan_max_output_tokens(),
            chat_max_output_tokens: default_chat_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiSettings {
    pub fn client_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.to_owned(),
            model: self.model.to_owned(),
            base_url: self.base_url.to_owned(),
            temperature: self.temperature,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_plan_max_output_tokens() -> u32 {
    PLAN_MAX_OUTPUT_TOKENS
}

fn default_chat_max_output_tokens() -> u32 {
    CHAT_MAX_OUTPUT_TOKENS
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy `GEMINI_API_KEY`
    /// 2. Environment variables (SMARTMAMA__GEMINI__MODEL, etc.)
    /// 3. Config file specified by path, `CONFIG_PATH` or `config/default.toml`
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SMARTMAMA")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            builder = builder.set_override("gemini.api_key", api_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.gemini.temperature) {
            return Err("Gemini temperature must be between 0 and 2".to_string());
        }
        if self.gemini.plan_max_output_tokens == 0 || self.gemini.chat_max_output_tokens == 0 {
            return Err("Gemini output token limits must be greater than 0".to_string());
        }
        if self.gemini.timeout_secs == 0 {
            return Err("Gemini timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}
