//! HTTP client for the generation service
//!
//! Speaks the `POST {base}/api/generate` protocol: a `{schema, count}` JSON
//! body in, a JSON array of records out, and `{"error": ...}` on failure.
//! No retries and no streaming.

use crate::config::ClientSettings;
use crate::domain::{
    GenerationError, GenerationPort, GenerationRequest, Record, FALLBACK_ERROR_MESSAGE,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: Option<String>,
}

pub struct HttpGenerationClient {
    client: Client,
    base_url: String,
}

impl HttpGenerationClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.api_url.clone(), settings.timeout())
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_PATH)
    }
}

#[async_trait]
impl GenerationPort for HttpGenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Record>, GenerationError> {
        let url = self.endpoint();
        debug!(%url, count = request.count, "Sending generation request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ServiceErrorBody>().await {
                Ok(ServiceErrorBody { error: Some(message) }) => message,
                Ok(_) => FALLBACK_ERROR_MESSAGE.to_string(),
                Err(e) => {
                    warn!(%status, error = %e, "Unreadable error body from generation service");
                    FALLBACK_ERROR_MESSAGE.to_string()
                }
            };
            return Err(GenerationError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<Record>>()
            .await
            .map_err(|e| GenerationError::MalformedBody(e.to_string()))
    }
}
