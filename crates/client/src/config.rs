use std::time::Duration;

use reqwest::header::HeaderValue;

use crate::error::PartnerApiError;

/// Production endpoint of the partner-management API.
pub const DEFAULT_API_URL: &str = "https://api.partnercenter.microsoft.com";

/// Locale sent in `X-Locale` unless overridden.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Per-request timeout unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`PartnerCenterApi`](crate::PartnerCenterApi).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without the `/v1` suffix.
    pub api_url: String,
    /// Bearer token obtained out of band.
    pub access_token: String,
    pub locale: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Config with defaults for everything but the token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: access_token.into(),
            locale: DEFAULT_LOCALE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                               | Default                                   |
    /// |---------------------------------------|-------------------------------------------|
    /// | `PARTNER_CENTER_ACCESS_TOKEN`         | required                                  |
    /// | `PARTNER_CENTER_API_URL`              | `https://api.partnercenter.microsoft.com` |
    /// | `PARTNER_CENTER_LOCALE`               | `en-US`                                   |
    /// | `PARTNER_CENTER_REQUEST_TIMEOUT_SECS` | `30`                                      |
    pub fn from_env() -> Result<Self, PartnerApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading through `lookup`,
    /// so callers can supply values from somewhere other than the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PartnerApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = non_blank("PARTNER_CENTER_ACCESS_TOKEN").ok_or_else(|| {
            PartnerApiError::InvalidConfig(
                "PARTNER_CENTER_ACCESS_TOKEN environment variable is required".into(),
            )
        })?;

        let api_url = non_blank("PARTNER_CENTER_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(PartnerApiError::InvalidConfig(format!(
                "PARTNER_CENTER_API_URL must be an http(s) URL, got '{api_url}'"
            )));
        }

        let locale = non_blank("PARTNER_CENTER_LOCALE")
            .map(|l| l.trim().to_string())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        // Sent verbatim as the X-Locale header.
        if HeaderValue::from_str(&locale).is_err() {
            return Err(PartnerApiError::InvalidConfig(format!(
                "PARTNER_CENTER_LOCALE must be a valid header value, got '{}'",
                locale.escape_debug()
            )));
        }

        let request_timeout_secs = match non_blank("PARTNER_CENTER_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(PartnerApiError::InvalidConfig(format!(
                        "PARTNER_CENTER_REQUEST_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url,
            access_token: access_token.trim().to_string(),
            locale,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}
