use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::types::{ChatMessage, ChatRequest, ChatResponse, ThoughtContext};
use crate::config::{ChatConfig, RequestConfig};
use crate::error::{ChatError, ChatResult};
use crate::prompts::investigation_system_prompt;

/// Sampling temperature for investigation chat.
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Client for an OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    request_config: RequestConfig,
}

impl ChatClient {
    /// Create a new chat client.
    ///
    /// Fails with [`ChatError::NotConfigured`] when no API key is set.
    pub fn new(config: &ChatConfig, request_config: RequestConfig) -> ChatResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| ChatError::NotConfigured {
            message: "CHAT_API_KEY is not set".to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(ChatError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            request_config,
        })
    }

    /// Answer a conversation about an investigation.
    ///
    /// The system prompt is prepended here; `history` holds only user and
    /// assistant turns.
    pub async fn complete(
        &self,
        history: &[ChatMessage],
        context: Option<&ThoughtContext>,
    ) -> ChatResult<String> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(investigation_system_prompt(context)));
        messages.extend(history.iter().cloned());

        let request = ChatRequest::new(&self.model, messages, CHAT_TEMPERATURE);
        let response = self.send(&request).await?;

        response
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| ChatError::InvalidResponse {
                message: "Response contained no choices".to_string(),
            })
    }

    /// Send a request, retrying transient failures with exponential backoff
    pub async fn send(&self, request: &ChatRequest) -> ChatResult<ChatResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut last_error = None;
        let mut retries = 0;

        while retries <= self.request_config.max_retries {
            if retries > 0 {
                let delay = backoff_delay(self.request_config.retry_delay_ms, retries);
                warn!(
                    model = %request.model,
                    retry = retries,
                    delay_ms = delay.as_millis(),
                    "Retrying chat request"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();

            match self.execute_request(&url, request).await {
                Ok(response) => {
                    info!(
                        model = %request.model,
                        latency_ms = start.elapsed().as_millis(),
                        "Chat completion succeeded"
                    );
                    return Ok(response);
                }
                Err(e) if !is_transient(&e) => {
                    error!(model = %request.model, error = %e, "Chat completion rejected");
                    return Err(e);
                }
                Err(e) => {
                    error!(
                        model = %request.model,
                        error = %e,
                        latency_ms = start.elapsed().as_millis(),
                        retry = retries,
                        "Chat completion failed"
                    );
                    last_error = Some(e);
                    retries += 1;
                }
            }
        }

        Err(ChatError::Unavailable {
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Unknown error".to_string()),
            retries,
        })
    }

    async fn execute_request(&self, url: &str, request: &ChatRequest) -> ChatResult<ChatResponse> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Calling chat completions"
        );

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout {
                        timeout_ms: self.request_config.timeout_ms,
                    }
                } else {
                    ChatError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse {
                message: format!("Failed to parse response: {}", e),
            })
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Errors worth retrying: network trouble, rate limits and server faults.
fn is_transient(err: &ChatError) -> bool {
    match err {
        ChatError::Timeout { .. } | ChatError::Http(_) => true,
        ChatError::Api { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

/// Delay before retry number `retry` (1-based): the base delay doubled per
/// earlier retry, saturating instead of overflowing.
fn backoff_delay(base_ms: u64, retry: u32) -> Duration {
    let factor = 2_u64
        .checked_pow(retry.saturating_sub(1))
        .unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(factor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> ChatConfig {
        ChatConfig {
            api_key: api_key.map(str::to_string),
            base_url: "https://api.openai.com/".to_string(),
            model: "gpt-4o".to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ChatClient::new(&config(Some("test_key")), RequestConfig::default()).unwrap();
        assert_eq!(client.base_url(), "https://api.openai.com");
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn test_client_requires_api_key() {
        let result = ChatClient::new(&config(None), RequestConfig::default());
        assert!(matches!(result, Err(ChatError::NotConfigured { .. })));
    }

    #[test]
    fn test_transient_classification() {
        assert!(is_transient(&ChatError::Timeout { timeout_ms: 10 }));
        assert!(is_transient(&ChatError::Api {
            status: 503,
            message: String::new()
        }));
        assert!(is_transient(&ChatError::Api {
            status: 429,
            message: String::new()
        }));
        assert!(!is_transient(&ChatError::Api {
            status: 401,
            message: String::new()
        }));
        assert!(!is_transient(&ChatError::InvalidResponse {
            message: String::new()
        }));
    }

    #[test]
    fn test_backoff_delay_doubles_and_saturates() {
        assert_eq!(backoff_delay(1000, 1), Duration::from_millis(1000));
        assert_eq!(backoff_delay(1000, 3), Duration::from_millis(4000));
        assert_eq!(backoff_delay(1000, 65), Duration::from_millis(u64::MAX));
        assert_eq!(backoff_delay(1000, 200), Duration::from_millis(u64::MAX));
    }
}
