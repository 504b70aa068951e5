use crate::utils::error::{HotelError, Result};
use crate::utils::validation::{validate_email, validate_non_empty_string, Validate};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Room,
    Apartment,
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccommodationType::Room => write!(f, "room"),
            AccommodationType::Apartment => write!(f, "apartment"),
        }
    }
}

impl FromStr for AccommodationType {
    type Err = HotelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "room" => Ok(AccommodationType::Room),
            "apartment" => Ok(AccommodationType::Apartment),
            other => Err(HotelError::InvalidAccommodationType {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Date range plus the already-resolved per-night rate. Rate resolution
/// belongs to the persistence side; this type only carries the inputs of
/// a price computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StayRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nightly_rate: f64,
}

/// Derived from a StayRequest, never mutated in place. Recomputed whenever
/// the stay changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub nights: u32,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub guest_name: String,
    pub guest_email: String,
    pub phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub accommodation_type: AccommodationType,
    pub accommodation_id: i64,
}

impl Validate for BookingDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("guest_name", &self.guest_name)?;
        validate_email("guest_email", &self.guest_email)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub guest_name: String,
    pub guest_email: String,
    pub phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub accommodation_type: AccommodationType,
    pub accommodation_id: i64,
    pub nights: u32,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

/// Partial update; None fields are left untouched. Changing dates or the
/// accommodation forces the quote to be recomputed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingUpdate {
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub phone: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub accommodation_type: Option<AccommodationType>,
    pub accommodation_id: Option<i64>,
    pub status: Option<BookingStatus>,
}

impl BookingUpdate {
    /// 這些欄位任一變動都會使既有報價失效
    pub fn affects_quote(&self) -> bool {
        self.check_in.is_some()
            || self.check_out.is_some()
            || self.accommodation_type.is_some()
            || self.accommodation_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Validate for ContactMessage {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_email("email", &self.email)?;
        validate_non_empty_string("message", &self.message)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Success,
    RetryableFailure,
    TerminalFailure,
}

/// One entry in the attempt log of a single dispatch call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    pub attempt_number: u32,
    pub outcome: AttemptOutcome,
    pub error_detail: Option<String>,
}

/// Outcome of one dispatch invocation. Owned by the caller; the attempt log
/// is complete and in order regardless of how the call ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    pub succeeded: bool,
    pub attempts: Vec<DeliveryAttempt>,
}

impl DispatchResult {
    pub fn attempt_count(&self) -> u32 {
        self.attempts.len() as u32
    }

    pub fn last_error_detail(&self) -> Option<&str> {
        self.attempts
            .iter()
            .rev()
            .find_map(|a| a.error_detail.as_deref())
    }
}
