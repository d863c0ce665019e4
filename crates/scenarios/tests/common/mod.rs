#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use partner_client::{PartnerApiError, PartnerOperations};
use partner_core::collection::ResourceCollection;
use partner_core::offers::{
    Availability, CatalogItemId, Eligibility, EligibilityType, TransitionEligibility,
};
use partner_core::subscription::Subscription;
use partner_core::types::ExtraFields;
use partner_scenarios::config::ScenarioDefaults;
use partner_scenarios::console::{Console, ConsoleHelper, LineKind};
use partner_scenarios::context::ScenarioContext;
use serde_json::json;

// ---------------------------------------------------------------------------
// Scripted console
// ---------------------------------------------------------------------------

/// Everything written to (and prompted on) the console, in order.
#[derive(Clone, Default)]
pub struct Transcript(Arc<Mutex<Vec<(LineKind, String)>>>);

impl Transcript {
    pub fn lines(&self) -> Vec<(LineKind, String)> {
        self.0.lock().unwrap().clone()
    }

    pub fn of_kind(&self, kind: LineKind) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, text)| text)
            .collect()
    }

    /// Prompts shown, without the marker prefix.
    pub fn prompts(&self) -> Vec<String> {
        self.of_kind(LineKind::Plain)
            .into_iter()
            .filter_map(|line| line.strip_prefix("? ").map(str::to_string))
            .collect()
    }

    /// All plain output joined, for substring checks on printed objects.
    pub fn plain_text(&self) -> String {
        self.of_kind(LineKind::Plain).join("\n")
    }
}

/// A [`Console`] that answers prompts from a fixed script.
pub struct ScriptedConsole {
    input: VecDeque<String>,
    transcript: Transcript,
}

impl ScriptedConsole {
    pub fn new(input: &[&str]) -> (Self, Transcript) {
        let transcript = Transcript::default();
        let console = Self {
            input: input.iter().map(|s| s.to_string()).collect(),
            transcript: transcript.clone(),
        };
        (console, transcript)
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript
            .0
            .lock()
            .unwrap()
            .push((LineKind::Plain, format!("? {prompt}")));
        Ok(self.input.pop_front())
    }

    fn write(&mut self, kind: LineKind, text: &str) -> io::Result<()> {
        self.transcript.0.lock().unwrap().push((kind, text.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fake partner API
// ---------------------------------------------------------------------------

/// One call observed by [`FakePartner`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetSubscription { customer_id: String, subscription_id: String },
    PatchSubscription { customer_id: String, subscription_id: String, body: Subscription },
    GetTransitionEligibilities { eligibility_type: EligibilityType },
    GetAvailability { customer_id: String, catalog_item: String },
}

/// In-memory stand-in for the partner API.
pub struct FakePartner {
    pub subscription: Mutex<Subscription>,
    pub eligibilities: ResourceCollection<TransitionEligibility>,
    pub fail_get_with: Option<u16>,
    pub calls: Mutex<Vec<Call>>,
}

pub const ELIGIBLE_ITEM: &str = "CFQ7TTC0LF8R:0001:CFQ7TTC0KXG6";
pub const INELIGIBLE_ITEM: &str = "CFQ7TTC0LFLZ:0002:CFQ7TTC0KXG7";

pub fn subscription(quantity: i32) -> Subscription {
    serde_json::from_value(json!({
        "id": "sub-1",
        "offerId": "CFQ7TTC0LH18:0001:CFQ7TTC0KDLJ",
        "friendlyName": "Microsoft 365 E3",
        "quantity": quantity,
        "billingCycle": "monthly",
        "termDuration": "P1Y",
        "attributes": { "etag": "etag-1", "objectType": "Subscription" }
    }))
    .unwrap()
}

pub fn transition(catalog_item_id: &str, eligible: bool) -> TransitionEligibility {
    TransitionEligibility {
        catalog_item_id: catalog_item_id.to_string(),
        title: Some(format!("Offer {catalog_item_id}")),
        eligibilities: vec![Eligibility {
            is_eligible: eligible,
            transition_type: Some("scheduled".into()),
            errors: if eligible {
                Vec::new()
            } else {
                vec![serde_json::from_value(json!({
                    "code": "SkuNotEligible",
                    "description": "The target SKU does not allow this transition"
                }))
                .unwrap()]
            },
        }],
        extra: ExtraFields::new(),
    }
}

impl FakePartner {
    pub fn new(quantity: i32) -> Self {
        Self {
            subscription: Mutex::new(subscription(quantity)),
            eligibilities: ResourceCollection::new(vec![
                transition(ELIGIBLE_ITEM, true),
                transition(INELIGIBLE_ITEM, false),
            ]),
            fail_get_with: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_eligibilities(mut self, items: Vec<TransitionEligibility>) -> Self {
        self.eligibilities = ResourceCollection::new(items);
        self
    }

    pub fn failing_get(mut self, status: u16) -> Self {
        self.fail_get_with = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn patched(&self) -> Vec<Subscription> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::PatchSubscription { body, .. } => Some(body),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl PartnerOperations for FakePartner {
    async fn get_subscription(
        &self,
        customer_id: &str,
        subscription_id: &str,
    ) -> Result<Subscription, PartnerApiError> {
        self.calls.lock().unwrap().push(Call::GetSubscription {
            customer_id: customer_id.into(),
            subscription_id: subscription_id.into(),
        });

        if let Some(status) = self.fail_get_with {
            return Err(PartnerApiError::Api {
                status,
                code: Some("900".into()),
                description: Some("Subscription not found".into()),
                body: String::new(),
            });
        }

        Ok(self.subscription.lock().unwrap().clone())
    }

    async fn patch_subscription(
        &self,
        customer_id: &str,
        subscription_id: &str,
        subscription: &Subscription,
    ) -> Result<Subscription, PartnerApiError> {
        self.calls.lock().unwrap().push(Call::PatchSubscription {
            customer_id: customer_id.into(),
            subscription_id: subscription_id.into(),
            body: subscription.clone(),
        });

        let mut stored = self.subscription.lock().unwrap();
        *stored = subscription.clone();
        stored.status = Some("active".into());
        Ok(stored.clone())
    }

    async fn get_transition_eligibilities(
        &self,
        _customer_id: &str,
        _subscription_id: &str,
        eligibility_type: EligibilityType,
    ) -> Result<ResourceCollection<TransitionEligibility>, PartnerApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::GetTransitionEligibilities { eligibility_type });
        Ok(self.eligibilities.clone())
    }

    async fn get_availability(
        &self,
        customer_id: &str,
        catalog_item: &CatalogItemId,
    ) -> Result<Availability, PartnerApiError> {
        self.calls.lock().unwrap().push(Call::GetAvailability {
            customer_id: customer_id.into(),
            catalog_item: catalog_item.to_string(),
        });

        Ok(serde_json::from_value(json!({
            "id": catalog_item.availability_id,
            "productId": catalog_item.product_id,
            "skuId": catalog_item.sku_id,
            "terms": [
                { "duration": "P1M", "description": "One-Month commitment" },
                { "duration": "P1Y", "description": "One-Year commitment" }
            ]
        }))
        .unwrap())
    }
}

// ---------------------------------------------------------------------------
// Context builder
// ---------------------------------------------------------------------------

pub fn context(
    partner: Arc<FakePartner>,
    input: &[&str],
    defaults: ScenarioDefaults,
) -> (ScenarioContext, Transcript) {
    let (console, transcript) = ScriptedConsole::new(input);
    let ctx = ScenarioContext::new(partner, ConsoleHelper::new(Box::new(console)), defaults);
    (ctx, transcript)
}
