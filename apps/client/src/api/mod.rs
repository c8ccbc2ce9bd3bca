//! HTTP client for the LangLeague backend.

mod ai;
mod books;
mod content;
mod exercises;
mod learning;
mod notes;

pub use ai::{GenerateRequest, GenerateResponse};
pub use books::ReorderUnitsRequest;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

const RETRY_BASE_DELAY: Duration = Duration::from_millis(200);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

/// Error body returned by the backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    detail: Option<String>,
}

/// Inner state shared across clones.
struct ApiClientInner {
    client: Client,
    base_url: String,
    token: Option<String>,
    ai_model: String,
    get_retries: u32,
}

/// Client for the backend REST API.
///
/// Clone-able; all clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.trim_end_matches('/').to_string(),
                token: config.token.clone(),
                ai_model: config.ai_model.clone(),
                get_retries: config.get_retries,
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Model name sent with AI generation requests.
    pub fn ai_model(&self) -> &str {
        &self.inner.ai_model
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.inner.base_url, path);
        let builder = self.inner.client.request(method, url);
        match &self.inner.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET and decode JSON, retrying transient failures with backoff.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_json(path).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.inner.get_retries => {
                    let delay = backoff_delay(attempt);
                    attempt += 1;
                    warn!(
                        "GET {} failed ({}), retry {}/{} in {:?}",
                        path, e, attempt, self.inner.get_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!("GET {} failed: {}", path, e);
                    return Err(e);
                }
            }
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = execute(self.request(Method::GET, path)).await?;
        decode(resp).await
    }

    /// Send a JSON body and decode the JSON reply. Never retried.
    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = execute(self.request(method.clone(), path).json(body))
            .await
            .map_err(|e| log_failure(&method, path, e))?;
        decode(resp).await
    }

    /// Send a JSON body and ignore the reply.
    pub(crate) async fn send_unit<B>(&self, method: Method, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        execute(self.request(method.clone(), path).json(body))
            .await
            .map_err(|e| log_failure(&method, path, e))?;
        Ok(())
    }

    /// POST without a body and decode the JSON reply.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = execute(self.request(Method::POST, path))
            .await
            .map_err(|e| log_failure(&Method::POST, path, e))?;
        decode(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        execute(self.request(Method::DELETE, path))
            .await
            .map_err(|e| log_failure(&Method::DELETE, path, e))?;
        Ok(())
    }
}

fn log_failure(method: &Method, path: &str, e: ClientError) -> ClientError {
    error!("{} {} failed: {}", method, path, e);
    e
}

/// Delay before retry number `attempt + 1`.
fn backoff_delay(attempt: u32) -> Duration {
    RETRY_BASE_DELAY
        .saturating_mul(1u32 << attempt.min(16))
        .min(RETRY_MAX_DELAY)
}

async fn execute(builder: RequestBuilder) -> Result<Response> {
    let resp = builder.send().await.map_err(ClientError::from)?;
    if resp.status().is_success() {
        return Ok(resp);
    }
    Err(error_from_response(resp).await)
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let bytes = resp.bytes().await?;
    debug!("Received {} bytes", bytes.len());
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
}

async fn error_from_response(resp: Response) -> ClientError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    ClientError::Backend {
        status,
        message: backend_message(&text),
    }
}

/// Pull the human message out of an error body, falling back to the raw text.
fn backend_message(text: &str) -> String {
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|body| body.error.or(body.message).or(body.detail))
        .unwrap_or_else(|| text.trim().to_string())
}

/// Id of a saved entity, or an error naming what was missing.
pub(crate) fn require_id(id: Option<i64>, kind: &str) -> Result<i64> {
    id.ok_or_else(|| ClientError::NotFound(format!("{} has no id", kind)))
}
