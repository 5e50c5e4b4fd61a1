use std::env;

use serde::{Deserialize, Serialize};

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_MODEL: &str = "amazon.nova-pro-v1:0";

/// Read-only agent configuration, fixed at construction. Environment lookup
/// happens only in `from_env`, called by the composition root; core logic
/// never touches the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotConfig {
    pub headless: bool,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub llm: Option<LlmConfig>,
    pub session: SessionBackendConfig,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            headless: true,
            timeout_secs: 60,
            max_retries: 3,
            llm: None,
            session: SessionBackendConfig::Mock,
        }
    }
}

impl PilotConfig {
    pub fn from_env() -> Self {
        Self {
            llm: LlmConfig::from_env(),
            session: SessionBackendConfig::from_env(),
            ..Self::default()
        }
    }
}

/// Model gateway settings. Absent entirely when no API key is configured, in
/// which case planning degrades to single-step fallback plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub region: String,
}

impl LlmConfig {
    fn from_env() -> Option<Self> {
        let api_key = env::var("WEBPILOT_LLM_API_KEY").ok()?;
        let region = env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let base_url = env::var("WEBPILOT_LLM_BASE_URL")
            .unwrap_or_else(|_| format!("https://bedrock-runtime.{region}.amazonaws.com/openai/v1"));
        let model = env::var("WEBPILOT_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Some(Self {
            api_key,
            base_url,
            model,
            region,
        })
    }
}

/// Which session backend to open. Chosen here, by configuration, so the core
/// never sniffs for capabilities at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum SessionBackendConfig {
    Remote { endpoint: String },
    Mock,
}

impl SessionBackendConfig {
    fn from_env() -> Self {
        match env::var("WEBPILOT_SESSION_ENDPOINT") {
            Ok(endpoint) if !endpoint.is_empty() => Self::Remote { endpoint },
            _ => Self::Mock,
        }
    }
}
