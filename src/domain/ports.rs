use crate::domain::model::{AccommodationType, Booking, NotificationRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Errors a delivery channel may report. The channel owns the classification:
/// each distinguishable transport error is mapped to exactly one of these
/// variants at the adapter, the dispatcher never re-classifies.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Retryable delivery failure: {message}")]
    Retryable { message: String },

    #[error("Terminal delivery failure: {message}")]
    Terminal { message: String },
}

impl ChannelError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ChannelError::Retryable { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ChannelError::Retryable { message } | ChannelError::Terminal { message } => message,
        }
    }
}

/// One outbound notification channel (SMTP relay, transactional mail API...).
/// A single call here is a single delivery attempt.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn deliver(
        &self,
        request: &NotificationRequest,
    ) -> std::result::Result<(), ChannelError>;
}

/// Resolves the per-night price of an accommodation. Returns Ok(None) when
/// the accommodation does not exist.
#[async_trait]
pub trait RateResolver: Send + Sync {
    async fn nightly_rate(&self, kind: AccommodationType, id: i64) -> Result<Option<f64>>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persists a new booking and returns it with its assigned id.
    async fn insert(&self, booking: Booking) -> Result<Booking>;

    async fn get(&self, id: i64) -> Result<Option<Booking>>;

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Booking>>;

    /// Replaces an existing booking; the id must already exist.
    async fn update(&self, booking: Booking) -> Result<Booking>;

    async fn delete(&self, id: i64) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn mail_endpoint(&self) -> &str;
    fn sender_email(&self) -> &str;
    fn front_desk_email(&self) -> &str;
    fn max_attempts(&self) -> u32;
    fn base_delay_ms(&self) -> u64;
}
