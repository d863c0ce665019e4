use partner_client::{ClientConfig, PartnerApiError};

/// Settings for the sample runner: client connection plus the optional
/// IDs that skip the customer and subscription prompts.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub client: ClientConfig,
    pub defaults: ScenarioDefaults,
}

/// IDs used instead of prompting, when configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioDefaults {
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
}

impl ScenarioDefaults {
    /// | Env Var                                  | Default |
    /// |------------------------------------------|---------|
    /// | `PARTNER_CENTER_DEFAULT_CUSTOMER_ID`     | prompt  |
    /// | `PARTNER_CENTER_DEFAULT_SUBSCRIPTION_ID` | prompt  |
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let id = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            customer_id: id("PARTNER_CENTER_DEFAULT_CUSTOMER_ID"),
            subscription_id: id("PARTNER_CENTER_DEFAULT_SUBSCRIPTION_ID"),
        }
    }
}

impl SampleConfig {
    /// Load everything from environment variables. See
    /// [`ClientConfig::from_env`] and [`ScenarioDefaults::from_lookup`] for
    /// the variables read.
    pub fn from_env() -> Result<Self, PartnerApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, PartnerApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            client: ClientConfig::from_lookup(&lookup)?,
            defaults: ScenarioDefaults::from_lookup(&lookup),
        })
    }
}
