//! The sample scenarios and their registry.
//!
//! Each scenario is a linear script: prompt, call the API, print. They are
//! listed in menu order by [`all`].

use async_trait::async_trait;

use crate::context::ScenarioContext;
use crate::error::ScenarioError;

pub mod get_subscription;
pub mod update_scheduled_change;
pub mod update_subscription;

pub use get_subscription::GetSubscription;
pub use update_scheduled_change::UpdateSubscriptionScheduledChange;
pub use update_subscription::UpdateSubscription;

/// One sample API workflow.
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Stable identifier used on the command line.
    fn name(&self) -> &'static str;

    /// Human-readable title shown in the menu and as the run header.
    fn title(&self) -> &'static str;

    /// Run to completion. Problems the user can act on (bad IDs, ineligible
    /// transitions) are reported on the console and return `Ok`.
    async fn run(&self, ctx: &mut ScenarioContext) -> Result<(), ScenarioError>;
}

/// Every scenario, in menu order.
pub fn all() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(GetSubscription),
        Box::new(UpdateSubscription),
        Box::new(UpdateSubscriptionScheduledChange),
    ]
}

/// Look a scenario up by its command-line name.
pub fn find(name: &str) -> Option<Box<dyn Scenario>> {
    all().into_iter().find(|s| s.name() == name)
}
