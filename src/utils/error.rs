use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HotelError {
    #[error("Invalid date range: check-out {check_out} must be after check-in {check_in}")]
    InvalidDateRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("Nightly rate cannot be negative: {rate}")]
    NegativeNightlyRate { rate: f64 },

    #[error("Invalid accommodation type: {value}")]
    InvalidAccommodationType { value: String },

    #[error("No {kind} found with id {id}")]
    UnknownAccommodation { kind: String, id: i64 },

    #[error("Booking not found: {id}")]
    BookingNotFound { id: i64 },

    #[error("Delivery rejected permanently: {detail}")]
    TerminalDeliveryFailure { detail: String },

    #[error("Delivery failed after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HotelError>;
