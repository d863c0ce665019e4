use async_trait::async_trait;

use crate::context::ScenarioContext;
use crate::error::ScenarioError;
use crate::scenarios::Scenario;

/// Retrieves a single customer subscription and prints it.
pub struct GetSubscription;

#[async_trait]
impl Scenario for GetSubscription {
    fn name(&self) -> &'static str {
        "get-subscription"
    }

    fn title(&self) -> &'static str {
        "Get customer subscription"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let customer_id = ctx.obtain_customer_id()?;
        let subscription_id = ctx.obtain_subscription_id(
            &customer_id,
            "Enter the ID of the subscription to retrieve",
        )?;

        ctx.console.start_progress("Retrieving customer subscription")?;
        let subscription = ctx
            .operations
            .get_subscription(&customer_id, &subscription_id)
            .await?;
        ctx.console.stop_progress()?;

        ctx.console
            .write_object(&subscription, Some("Customer subscription"), 0)
    }
}
