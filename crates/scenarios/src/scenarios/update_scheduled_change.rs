//! Schedules a product or term change for a subscription's next term.
//!
//! Flow: fetch the subscription, list its scheduled transition
//! eligibilities, let the user pick a catalog item, show that item's
//! availability terms, collect the new term details and PATCH the
//! subscription with `scheduledNextTermInstructions` set.

use async_trait::async_trait;
use partner_core::input::{normalize_optional, parse_quantity, parse_term_end_date};
use partner_core::offers::{CatalogItemId, EligibilityType};
use partner_core::subscription::{BillingCycleType, ProductTerm, ScheduledNextTermInstructions};

use crate::context::ScenarioContext;
use crate::error::ScenarioError;
use crate::scenarios::Scenario;

pub const NO_ELIGIBLE_TRANSITIONS: &str =
    "This subscription has no eligible transitions for scheduled change";
pub const CATALOG_ITEM_NOT_FOUND: &str = "The entered scheduled change catalog item ID was not found in the list of transition eligibilities";
pub const CATALOG_ITEM_NOT_ELIGIBLE: &str =
    "The entered scheduled change catalog item ID is not eligible for the following reasons:";

/// Updates a customer subscription's scheduled change.
pub struct UpdateSubscriptionScheduledChange;

#[async_trait]
impl Scenario for UpdateSubscriptionScheduledChange {
    fn name(&self) -> &'static str {
        "update-scheduled-change"
    }

    fn title(&self) -> &'static str {
        "Update customer subscription scheduled change"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError> {
        let customer_id = ctx.obtain_customer_id()?;
        let subscription_id = ctx.obtain_subscription_id(
            &customer_id,
            "Enter the ID of the subscription to update the scheduled change for",
        )?;

        ctx.console.start_progress("Getting subscription")?;
        let mut subscription = ctx
            .operations
            .get_subscription(&customer_id, &subscription_id)
            .await?;
        ctx.console.stop_progress()?;
        ctx.console
            .write_object(&subscription, Some("Existing subscription"), 0)?;

        ctx.console
            .start_progress("Retrieving transition eligibilities for scheduled change")?;
        let eligibilities = ctx
            .operations
            .get_transition_eligibilities(&customer_id, &subscription_id, EligibilityType::Scheduled)
            .await?;
        ctx.console.stop_progress()?;

        if eligibilities.is_empty() {
            return ctx.console.error(NO_ELIGIBLE_TRANSITIONS);
        }

        ctx.console
            .write_object(&eligibilities, Some("Available transition eligibilities"), 0)?;

        let entered = ctx.console.read_non_empty_string(
            "Enter the scheduled change catalog item ID",
            "Scheduled change catalog item ID can't be empty",
        )?;

        let Some(selected) = eligibilities.find_catalog_item(&entered) else {
            return ctx.console.error(CATALOG_ITEM_NOT_FOUND);
        };

        if !selected.is_eligible() {
            ctx.console.error(CATALOG_ITEM_NOT_ELIGIBLE)?;
            return ctx.console.write_object(&selected.eligibilities, None, 1);
        }

        let catalog_item: CatalogItemId = match selected.catalog_item_id.parse() {
            Ok(id) => id,
            Err(e) => return ctx.console.error(&e.to_string()),
        };

        ctx.console
            .start_progress("Retrieving catalog availability terms")?;
        let availability = ctx
            .operations
            .get_availability(&customer_id, &catalog_item)
            .await?;
        ctx.console.stop_progress()?;
        ctx.console.write_object(
            &availability.terms,
            Some("Available catalog availability terms"),
            0,
        )?;

        let billing_cycle = ctx.console.read_parsed(
            "Enter the scheduled change billing cycle",
            "Scheduled change billing cycle can't be empty",
            |s| s.parse::<BillingCycleType>(),
        )?;

        let term_duration = ctx.console.read_non_empty_string(
            "Enter the scheduled change term duration",
            "Scheduled change term duration can't be empty",
        )?;

        let promotion_id = normalize_optional(&ctx.console.read_optional_string(
            "Enter the scheduled promotion id or leave blank to automatically check and fill with an available promotion",
        )?);

        let quantity = ctx.console.read_parsed(
            "Enter the scheduled change quantity",
            "Scheduled change quantity can't be empty",
            parse_quantity,
        )?;

        let custom_term_end_date = ctx.console.read_optional_parsed(
            "Enter the scheduled change custom term end date or leave blank to keep the current term end date",
            parse_term_end_date,
        )?;

        ctx.console
            .start_progress("Updating subscription scheduled change")?;
        tracing::info!(
            customer_id = %customer_id,
            subscription_id = %subscription_id,
            catalog_item = %catalog_item,
            %billing_cycle,
            quantity,
            "Scheduling subscription change",
        );
        subscription.scheduled_next_term_instructions = Some(ScheduledNextTermInstructions::new(
            ProductTerm::for_catalog_item(&catalog_item, billing_cycle, term_duration, promotion_id),
            quantity,
            custom_term_end_date,
        ));
        let updated = ctx
            .operations
            .patch_subscription(&customer_id, &subscription_id, &subscription)
            .await?;
        ctx.console.stop_progress()?;

        ctx.console
            .write_object(&updated, Some("Updated subscription scheduled change"), 0)?;
        ctx.console
            .success(&format!("Scheduled change to {catalog_item} submitted"))
    }
}
