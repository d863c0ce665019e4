use async_trait::async_trait;

use crate::context::ScenarioContext;
use crate::error::ScenarioError;
use crate::scenarios::Scenario;

/// Adds one seat to an existing customer subscription.
pub struct UpdateSubscription;

#[async_trait]
impl Scenario for UpdateSubscription {
    fn name(&self) -> &'static str {
        "update-subscription"
    }

    fn title(&self) -> &'static str {
        "Update existing customer subscription"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let customer_id = ctx.obtain_customer_id()?;
        let subscription_id =
            ctx.obtain_subscription_id(&customer_id, "Enter the ID of the subscription to update")?;

        ctx.console.start_progress("Retrieving customer subscription")?;
        let mut subscription = ctx
            .operations
            .get_subscription(&customer_id, &subscription_id)
            .await?;
        ctx.console.stop_progress()?;
        ctx.console
            .write_object(&subscription, Some("Existing subscription"), 0)?;

        ctx.console.start_progress("Incrementing subscription quantity")?;
        let previous = subscription.quantity;
        let quantity = subscription
            .increment_quantity()
            .ok_or(ScenarioError::QuantityOverflow)?;
        tracing::info!(
            customer_id = %customer_id,
            subscription_id = %subscription_id,
            previous,
            quantity,
            "Updating subscription quantity",
        );
        let updated = ctx
            .operations
            .patch_subscription(&customer_id, &subscription_id, &subscription)
            .await?;
        ctx.console.stop_progress()?;

        ctx.console
            .write_object(&updated, Some("Updated subscription"), 0)?;
        ctx.console
            .success(&format!("Subscription quantity is now {}", updated.quantity))
    }
}
