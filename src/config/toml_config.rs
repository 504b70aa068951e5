use crate::core::dispatch::RetryPolicy;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub hotel: HotelConfig,
    pub mailer: MailerConfig,
    pub retry: Option<RetryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelConfig {
    pub name: String,
    pub front_desk_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    pub endpoint: String,
    pub sender_email: String,
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HotelError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HotelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SENDGRID_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("mailer.endpoint", &self.mailer.endpoint)?;
        crate::utils::validation::validate_email("mailer.sender_email", &self.mailer.sender_email)?;
        crate::utils::validation::validate_email(
            "hotel.front_desk_email",
            &self.hotel.front_desk_email,
        )?;
        crate::utils::validation::validate_non_empty_string("mailer.api_key", &self.mailer.api_key)?;

        if let Some(retry) = &self.retry {
            if let Some(max_attempts) = retry.max_attempts {
                crate::utils::validation::validate_positive_number(
                    "retry.max_attempts",
                    max_attempts as usize,
                    1,
                )?;
            }
        }

        Ok(())
    }

    /// 取得重試策略；缺省值與程式內建預設一致
    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        match &self.retry {
            Some(retry) => RetryPolicy {
                max_attempts: retry.max_attempts.unwrap_or(defaults.max_attempts),
                base_delay: retry
                    .base_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.base_delay),
                max_delay: retry
                    .max_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.max_delay),
            },
            None => defaults,
        }
    }

    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mailer.timeout_seconds.unwrap_or(120))
    }
}

impl ConfigProvider for TomlConfig {
    fn mail_endpoint(&self) -> &str {
        &self.mailer.endpoint
    }

    fn sender_email(&self) -> &str {
        &self.mailer.sender_email
    }

    fn front_desk_email(&self) -> &str {
        &self.hotel.front_desk_email
    }

    fn max_attempts(&self) -> u32 {
        self.retry_policy().max_attempts
    }

    fn base_delay_ms(&self) -> u64 {
        self.retry_policy().base_delay.as_millis() as u64
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
