use std::sync::Arc;

use partner_client::PartnerOperations;

use crate::config::ScenarioDefaults;
use crate::console::ConsoleHelper;
use crate::error::ScenarioError;

/// Everything a scenario needs: the API, the console, and configured
/// defaults for the IDs it would otherwise prompt for.
pub struct ScenarioContext {
    pub operations: Arc<dyn PartnerOperations>,
    pub console: ConsoleHelper,
    pub defaults: ScenarioDefaults,
}

impl ScenarioContext {
    pub fn new(
        operations: Arc<dyn PartnerOperations>,
        console: ConsoleHelper,
        defaults: ScenarioDefaults,
    ) -> Self {
        Self {
            operations,
            console,
            defaults,
        }
    }

    /// Customer to operate on: the configured default, or prompted.
    pub fn obtain_customer_id(&mut self) -> Result<String, ScenarioError> {
        if let Some(customer_id) = self.defaults.customer_id.clone() {
            self.console
                .write_line(&format!("Using customer ID {customer_id} from configuration"))?;
            return Ok(customer_id);
        }

        self.console
            .read_non_empty_string("Enter the customer ID", "The customer ID can't be empty")
    }

    /// Subscription to operate on: the configured default, or prompted with
    /// `prompt`.
    pub fn obtain_subscription_id(
        &mut self,
        customer_id: &str,
        prompt: &str,
    ) -> Result<String, ScenarioError> {
        if let Some(subscription_id) = self.defaults.subscription_id.clone() {
            self.console.write_line(&format!(
                "Using subscription ID {subscription_id} from configuration"
            ))?;
            return Ok(subscription_id);
        }

        tracing::debug!(customer_id, "Prompting for subscription ID");
        self.console
            .read_non_empty_string(prompt, "The subscription ID can't be empty")
    }
}
