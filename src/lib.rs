pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{toml_config::TomlConfig, CliConfig};

pub use crate::adapters::http_mail::HttpMailChannel;
pub use crate::adapters::memory::{InMemoryBookingStore, StaticRateResolver};
pub use crate::core::booking::BookingService;
pub use crate::core::contact::ContactService;
pub use crate::core::dispatch::{Dispatcher, RetryPolicy};
pub use crate::core::pricing::quote;
pub use crate::domain::model::{
    AccommodationType, Booking, BookingDraft, BookingStatus, BookingUpdate, ContactMessage,
    DispatchResult, NotificationRequest, PriceQuote, StayRequest,
};
pub use crate::domain::ports::{ChannelError, DeliveryChannel};
pub use crate::utils::error::{HotelError, Result};
