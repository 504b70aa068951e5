pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::{
    validate_email, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "hotel-mailer"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Sends a test contact notification through the hotel mail channel")
)]
pub struct CliConfig {
    #[cfg_attr(
        feature = "cli",
        arg(long, default_value = "https://api.sendgrid.com/v3/mail/send")
    )]
    pub mail_endpoint: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "noreply@hotel-dd.com"))]
    pub sender_email: String,

    #[cfg_attr(
        feature = "cli",
        arg(long, default_value = "frontdesk@hotel-dd.com")
    )]
    pub front_desk_email: String,

    /// Falls back to the SENDGRID_API_KEY environment variable when omitted.
    #[cfg_attr(feature = "cli", arg(long))]
    pub api_key: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, default_value = "3"))]
    pub max_attempts: u32,

    #[cfg_attr(feature = "cli", arg(long, default_value = "1000"))]
    pub base_delay_ms: u64,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl CliConfig {
    pub fn resolved_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var("SENDGRID_API_KEY").map_err(|_| HotelError::MissingConfigError {
            field: "api_key (or SENDGRID_API_KEY)".to_string(),
        })
    }
}

impl ConfigProvider for CliConfig {
    fn mail_endpoint(&self) -> &str {
        &self.mail_endpoint
    }

    fn sender_email(&self) -> &str {
        &self.sender_email
    }

    fn front_desk_email(&self) -> &str {
        &self.front_desk_email
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn base_delay_ms(&self) -> u64 {
        self.base_delay_ms
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("mail_endpoint", &self.mail_endpoint)?;
        validate_email("sender_email", &self.sender_email)?;
        validate_email("front_desk_email", &self.front_desk_email)?;
        validate_positive_number("max_attempts", self.max_attempts as usize, 1)?;
        Ok(())
    }
}
