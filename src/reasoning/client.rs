use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use super::{ReasoningError, ReasoningService};
use crate::config::ReasoningConfig;

/// Client for a llama-server style completion endpoint.
#[derive(Clone)]
pub struct HttpReasoningClient {
    client: Client,
    config: ReasoningConfig,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    stream: bool,
    n_predict: usize,
    temperature: f32,
    stop: Vec<String>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

impl HttpReasoningClient {
    pub fn new(config: ReasoningConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    async fn request(&self, prompt: &str) -> Result<String, ReasoningError> {
        let body = CompletionRequest {
            prompt,
            stream: false, // One-shot only
            n_predict: self.config.max_tokens,
            temperature: self.config.temperature,
            stop: Vec::new(),
        };

        let response = self
            .client
            .post(format!("{}/completion", self.config.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ReasoningError::RateLimited);
        }
        if !status.is_success() {
            // Some gateways report quota exhaustion in the body instead of 429.
            let text = response.text().await.unwrap_or_default().to_lowercase();
            if text.contains("rate limit") || text.contains("quota") {
                return Err(ReasoningError::RateLimited);
            }
            return Err(ReasoningError::Server {
                status: status.as_u16(),
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        let content = parsed.content.trim().to_string();
        if content.is_empty() {
            return Err(ReasoningError::EmptyReply);
        }
        Ok(content)
    }
}

impl ReasoningService for HttpReasoningClient {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ReasoningError>> + Send {
        self.request(prompt)
    }
}
