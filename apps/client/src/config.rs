//! Client configuration from the environment.

use crate::error::{ClientError, Result};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GET_RETRIES: u32 = 3;

/// Settings for the backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash.
    pub api_url: String,
    /// Bearer token sent with every request.
    pub token: Option<String>,
    /// Model name forwarded to the AI proxy.
    pub ai_model: String,
    pub timeout: Duration,
    /// Extra attempts for idempotent GET requests.
    pub get_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            ai_model: DEFAULT_AI_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            get_retries: DEFAULT_GET_RETRIES,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `api_url` with defaults for everything else.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Load from `LANGLEAGUE_*` variables, reading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("LANGLEAGUE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = lookup("LANGLEAGUE_TOKEN").filter(|t| !t.trim().is_empty());
        let ai_model =
            lookup("LANGLEAGUE_AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string());
        let timeout_secs = parse_number("LANGLEAGUE_TIMEOUT_SECS", lookup("LANGLEAGUE_TIMEOUT_SECS"))?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let get_retries = parse_number("LANGLEAGUE_GET_RETRIES", lookup("LANGLEAGUE_GET_RETRIES"))?
            .unwrap_or(DEFAULT_GET_RETRIES);

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            ai_model,
            timeout: Duration::from_secs(timeout_secs),
            get_retries,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_ai_model(mut self, model: impl Into<String>) -> Self {
        self.ai_model = model.into();
        self
    }

    pub fn with_get_retries(mut self, retries: u32) -> Self {
        self.get_retries = retries;
        self
    }
}

fn parse_number<N: FromStr>(key: &str, value: Option<String>) -> Result<Option<N>> {
    value
        .map(|v| {
            v.trim().parse::<N>().map_err(|_| {
                ClientError::Config(format!("{} is not a valid number, got {:?}", key, v))
            })
        })
        .transpose()
}
