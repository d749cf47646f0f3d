//! Process configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` (if present) and builds one `AppConfig` before binding
//! the listener. Handlers read it through `AppState`; nothing else touches
//! the environment after startup.

use std::collections::HashSet;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ADMIN_EMAILS: &str = "test@inmogestion.com";
const DEFAULT_CODE_REQUEST_LIMIT: usize = 5;
const DEFAULT_CODE_REQUEST_WINDOW_SECS: u64 = 600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Resend delivery credentials for access-code emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendConfig {
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub cookie_secure: bool,
    /// Addresses promoted to the `admin` role when they sign in.
    pub admin_emails: HashSet<String>,
    /// Return generated access codes in the API response (development only).
    pub echo_codes: bool,
    pub resend: Option<ResendConfig>,
    pub code_request_limit: usize,
    pub code_request_window: Duration,
}

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// Required: `DATABASE_URL`.
    ///
    /// Optional: `PORT`, `COOKIE_SECURE`, `ADMIN_EMAILS`, `EMAIL_CODE_ECHO`,
    /// `RESEND_API_KEY` + `RESEND_FROM`, `CODE_REQUEST_LIMIT`,
    /// `CODE_REQUEST_WINDOW_SECS`.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is unset or a numeric/boolean
    /// variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let cookie_secure = env_flag("COOKIE_SECURE")?.unwrap_or(false);
        let echo_codes = env_flag("EMAIL_CODE_ECHO")?.unwrap_or(false);
        let admin_emails =
            parse_admin_emails(&std::env::var("ADMIN_EMAILS").unwrap_or_else(|_| DEFAULT_ADMIN_EMAILS.to_owned()));
        let resend = match (std::env::var("RESEND_API_KEY").ok(), std::env::var("RESEND_FROM").ok()) {
            (Some(api_key), Some(from)) if !api_key.trim().is_empty() && !from.trim().is_empty() => {
                Some(ResendConfig { api_key, from })
            }
            _ => None,
        };
        let code_request_limit = env_parse("CODE_REQUEST_LIMIT", DEFAULT_CODE_REQUEST_LIMIT)?;
        let window_secs = env_parse("CODE_REQUEST_WINDOW_SECS", DEFAULT_CODE_REQUEST_WINDOW_SECS)?;

        Ok(Self {
            database_url,
            port,
            cookie_secure,
            admin_emails,
            echo_codes,
            resend,
            code_request_limit,
            code_request_window: Duration::from_secs(window_secs),
        })
    }

    /// Whether `email` is listed for admin promotion.
    #[must_use]
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.contains(&email.trim().to_ascii_lowercase())
    }
}

/// Parse a boolean flag value. Accepts `1/true/yes/on` and `0/false/no/off`.
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split a comma-separated address list into normalized emails.
#[must_use]
pub fn parse_admin_emails(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|email| email.trim().to_ascii_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}

fn env_flag(key: &'static str) -> Result<Option<bool>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => parse_bool(&raw).map(Some).ok_or(ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(None),
    }
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(default),
    }
}


#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
