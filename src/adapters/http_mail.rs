use crate::domain::model::NotificationRequest;
use crate::domain::ports::{ChannelError, DeliveryChannel};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::time::Duration;

/// Transactional-mail channel speaking the SendGrid v3 send API. Every
/// `deliver` is a single POST; classification of the response into retryable
/// and terminal failures lives here, not in the dispatcher.
pub struct HttpMailChannel {
    client: Client,
    endpoint: String,
    api_key: String,
    sender: String,
}

impl HttpMailChannel {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            sender: sender.into(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        // builder 失敗只會發生在 TLS 後端壞掉，保留原 client
        if let Ok(client) = Client::builder().timeout(timeout).build() {
            self.client = client;
        }
        self
    }

    fn payload(&self, request: &NotificationRequest) -> serde_json::Value {
        json!({
            "personalizations": [{ "to": [{ "email": request.recipient }] }],
            "from": { "email": self.sender },
            "subject": request.subject,
            "content": [{ "type": "text/plain", "value": request.body }],
        })
    }

    /// Fixed classification table:
    /// 401/403 -> terminal (credentials), other 4xx -> terminal (payload
    /// rejected), 408/429/5xx -> retryable. Mirrors the old SMTP handling
    /// where auth and sender-refused errors were never retried.
    fn classify_status(status: StatusCode, body: &str) -> ChannelError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ChannelError::Terminal {
                message: format!("Authentication failed ({}): check API key", status.as_u16()),
            },
            StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
                ChannelError::Retryable {
                    message: format!("Mail API throttled request ({})", status.as_u16()),
                }
            }
            s if s.is_server_error() => ChannelError::Retryable {
                message: format!("Mail API server error ({})", s.as_u16()),
            },
            s => ChannelError::Terminal {
                message: format!("Mail API rejected payload ({}): {}", s.as_u16(), body),
            },
        }
    }
}

#[async_trait]
impl DeliveryChannel for HttpMailChannel {
    async fn deliver(&self, request: &NotificationRequest) -> Result<(), ChannelError> {
        tracing::debug!("POST {} (to: {})", self.endpoint, request.recipient);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.payload(request))
            .send()
            .await
            .map_err(|e| {
                // Transport-level problems (refused connection, timeout, DNS)
                // are presumed transient.
                ChannelError::Retryable {
                    message: format!("Connection to mail API failed: {}", e),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Mail API accepted message ({})", status.as_u16());
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::classify_status(status, &body))
    }
}
