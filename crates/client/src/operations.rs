use async_trait::async_trait;
use partner_core::collection::ResourceCollection;
use partner_core::offers::{Availability, CatalogItemId, EligibilityType, TransitionEligibility};
use partner_core::subscription::Subscription;

use crate::error::PartnerApiError;

/// The subset of partner API calls the sample scenarios use.
///
/// Calls are issued one at a time; implementations need not be
/// re-entrant beyond what `Send + Sync` demands.
#[async_trait]
pub trait PartnerOperations: Send + Sync {
    /// Fetch one customer subscription.
    async fn get_subscription(
        &self,
        customer_id: &str,
        subscription_id: &str,
    ) -> Result<Subscription, PartnerApiError>;

    /// Send a modified subscription back and return the service's copy.
    async fn patch_subscription(
        &self,
        customer_id: &str,
        subscription_id: &str,
        subscription: &Subscription,
    ) -> Result<Subscription, PartnerApiError>;

    /// List the catalog items a subscription may transition to.
    async fn get_transition_eligibilities(
        &self,
        customer_id: &str,
        subscription_id: &str,
        eligibility_type: EligibilityType,
    ) -> Result<ResourceCollection<TransitionEligibility>, PartnerApiError>;

    /// Fetch a catalog availability (and its terms) in a customer's market.
    async fn get_availability(
        &self,
        customer_id: &str,
        catalog_item: &CatalogItemId,
    ) -> Result<Availability, PartnerApiError>;
}
