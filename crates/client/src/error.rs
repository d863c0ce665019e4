use serde::Deserialize;

/// Errors from the partner REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum PartnerApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Partner API error ({status}){}", describe(.code.as_deref(), .description.as_deref()))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Service error code, when the body carried one.
        code: Option<String>,
        /// Service error description, when the body carried one.
        description: Option<String>,
        /// Raw response body for debugging.
        body: String,
    },

    /// Client configuration was missing or malformed.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

fn describe(code: Option<&str>, description: Option<&str>) -> String {
    match (code, description) {
        (Some(code), Some(description)) => format!(": [{code}] {description}"),
        (None, Some(description)) => format!(": {description}"),
        (Some(code), None) => format!(": [{code}]"),
        (None, None) => String::new(),
    }
}

/// JSON error envelope returned by the service on failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServiceErrorBody {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PartnerApiError {
    /// Build an [`PartnerApiError::Api`] from a failed response's status and
    /// body, extracting the service's code and description when the body is
    /// the usual JSON envelope.
    pub(crate) fn from_response(status: u16, body: String) -> Self {
        let parsed = serde_json::from_str::<ServiceErrorBody>(&body).ok();
        let (code, description) = match parsed {
            Some(err) => (
                err.code.map(|c| match c {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                }),
                err.description,
            ),
            None => (None, None),
        };

        Self::Api {
            status,
            code,
            description,
            body,
        }
    }

    /// HTTP status for API errors; `None` for transport and config errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidConfig(_) => None,
        }
    }
}
