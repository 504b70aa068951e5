use crate::core::dispatch::{Dispatcher, RetryPolicy};
use crate::domain::model::{AttemptOutcome, ContactMessage, DispatchResult, NotificationRequest};
use crate::domain::ports::{ConfigProvider, DeliveryChannel};
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::Validate;
use std::time::Duration;

/// Takes a contact-form submission, renders it into a notification for the
/// front desk and pushes it through the retry dispatcher.
pub struct ContactService<C: DeliveryChannel> {
    dispatcher: Dispatcher<C>,
    front_desk_email: String,
}

impl<C: DeliveryChannel> ContactService<C> {
    pub fn new(channel: C, policy: RetryPolicy, front_desk_email: impl Into<String>) -> Self {
        Self {
            dispatcher: Dispatcher::new(channel, policy),
            front_desk_email: front_desk_email.into(),
        }
    }

    /// Builds the service from any configuration source (CLI flags, TOML).
    pub fn from_config(channel: C, config: &dyn ConfigProvider) -> Self {
        let policy = RetryPolicy {
            max_attempts: config.max_attempts().max(1),
            base_delay: Duration::from_millis(config.base_delay_ms()),
            ..Default::default()
        };
        Self::new(channel, policy, config.front_desk_email())
    }

    fn to_notification(&self, message: &ContactMessage) -> NotificationRequest {
        let sent_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");
        NotificationRequest {
            recipient: self.front_desk_email.clone(),
            subject: format!("New contact from {}", message.name),
            body: format!(
                "Name: {}\nEmail: {}\nMessage: {}\nSent: {}",
                message.name, message.email, message.message, sent_at
            ),
        }
    }

    /// Validates and sends the message. A failed dispatch becomes a typed
    /// error: terminal rejection surfaces as `TerminalDeliveryFailure`, an
    /// exhausted budget as `RetriesExhausted`. The full attempt history is
    /// logged either way.
    pub async fn send(&self, message: &ContactMessage) -> Result<DispatchResult> {
        message.validate()?;

        let request = self.to_notification(message);
        let result = self.dispatcher.dispatch(&request).await;

        if result.succeeded {
            tracing::info!(
                "Contact message from {} forwarded to {}",
                message.email,
                self.front_desk_email
            );
            return Ok(result);
        }

        for attempt in &result.attempts {
            tracing::warn!(
                "Attempt {}: {:?} ({})",
                attempt.attempt_number,
                attempt.outcome,
                attempt.error_detail.as_deref().unwrap_or("-")
            );
        }

        match result.attempts.last().map(|a| a.outcome) {
            Some(AttemptOutcome::TerminalFailure) => Err(HotelError::TerminalDeliveryFailure {
                detail: result
                    .last_error_detail()
                    .unwrap_or("delivery rejected")
                    .to_string(),
            }),
            _ => Err(HotelError::RetriesExhausted {
                attempts: result.attempt_count(),
            }),
        }
    }
}
