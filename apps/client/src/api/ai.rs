//! AI text generation proxy.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ApiClient;
use crate::error::{ClientError, Result};

/// Body of `POST /api/ai/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Reply of `POST /api/ai/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub text: String,
}

impl ApiClient {
    /// Send a prompt to the AI proxy and return the raw generated text.
    ///
    /// A blank reply is an error.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let model = self.ai_model();
        let request = GenerateRequest {
            prompt: prompt.to_string(),
            model: (!model.is_empty()).then(|| model.to_string()),
        };
        debug!("Generating with {} (prompt {} chars)", model, prompt.len());

        let response: GenerateResponse = self
            .send_json(Method::POST, "/api/ai/generate", &request)
            .await?;

        if response.text.trim().is_empty() {
            warn!("AI service returned an empty response");
            return Err(ClientError::EmptyResponse("AI service"));
        }
        debug!("Generated {} chars", response.text.len());
        Ok(response.text)
    }
}
