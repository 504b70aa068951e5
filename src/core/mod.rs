pub mod booking;
pub mod contact;
pub mod dispatch;
pub mod pricing;

pub use crate::domain::model::{
    Booking, BookingDraft, BookingUpdate, ContactMessage, DeliveryAttempt, DispatchResult,
    NotificationRequest, PriceQuote, StayRequest,
};
pub use crate::domain::ports::{
    BookingStore, ChannelError, ConfigProvider, DeliveryChannel, RateResolver,
};
pub use crate::utils::error::Result;
