use partner_client::PartnerApiError;

/// Errors that end a scenario early.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// A partner API call failed.
    #[error(transparent)]
    Api(#[from] PartnerApiError),

    /// Reading from or writing to the console failed.
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended (stdin closed) while the scenario was still prompting.
    #[error("Input closed before the scenario finished")]
    InputClosed,

    /// The subscription is already at the largest representable quantity.
    #[error("Subscription quantity cannot be incremented past {max}", max = i32::MAX)]
    QuantityOverflow,

    /// A value could not be rendered for display.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl ScenarioError {
    /// Whether the console itself is unusable, so the caller should stop
    /// rather than report the error and carry on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_) | Self::InputClosed)
    }
}
