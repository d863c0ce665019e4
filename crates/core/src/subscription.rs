//! Subscription resource and its scheduled next-term instructions.
//!
//! The service owns these objects. Scenarios fetch a [`Subscription`],
//! change one or two fields and send the whole object back, so every
//! model keeps unrecognised fields in `extra` to survive the round trip.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::offers::CatalogItemId;
use crate::types::{ExtraFields, Timestamp};

// ---------------------------------------------------------------------------
// Billing cycle
// ---------------------------------------------------------------------------

/// How often a subscription (or a scheduled term) is billed.
///
/// Wire values this crate does not know are kept verbatim in
/// [`BillingCycleType::Other`] so they go back to the service unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillingCycleType {
    Unknown,
    Monthly,
    Annual,
    None,
    OneTime,
    Triennial,
    /// Unrecognised wire value, as received.
    Other(String),
}

impl BillingCycleType {
    /// Display names accepted by [`FromStr`], in declaration order.
    pub const NAMES: [&'static str; 6] =
        ["Unknown", "Monthly", "Annual", "None", "OneTime", "Triennial"];

    /// JSON spelling used by the partner API.
    pub fn wire_name(&self) -> &str {
        match self {
            Self::Unknown => "unknown",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
            Self::None => "none",
            Self::OneTime => "one_time",
            Self::Triennial => "triennial",
            Self::Other(raw) => raw.as_str(),
        }
    }

    fn from_normalized(key: &str) -> Option<Self> {
        match key {
            "unknown" => Some(Self::Unknown),
            "monthly" => Some(Self::Monthly),
            "annual" => Some(Self::Annual),
            "none" => Some(Self::None),
            "onetime" => Some(Self::OneTime),
            "triennial" => Some(Self::Triennial),
            _ => None,
        }
    }
}

/// Lowercase and drop `_`/`-` so `OneTime`, `one_time` and `one-time` agree.
fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for BillingCycleType {
    type Err = CoreError;

    /// Parse a billing cycle typed at the console. Case-insensitive; only
    /// the known cycles are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_normalized(&normalize_key(s))
            .ok_or_else(|| CoreError::InvalidBillingCycle(s.trim().to_string()))
    }
}

impl From<String> for BillingCycleType {
    fn from(value: String) -> Self {
        Self::from_normalized(&normalize_key(&value)).unwrap_or(Self::Other(value))
    }
}

impl From<BillingCycleType> for String {
    fn from(value: BillingCycleType) -> Self {
        match value {
            BillingCycleType::Other(raw) => raw,
            known => known.wire_name().to_string(),
        }
    }
}

impl fmt::Display for BillingCycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ---------------------------------------------------------------------------
// Scheduled change
// ---------------------------------------------------------------------------

/// The product a subscription should move to at its next term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTerm {
    pub product_id: String,
    pub sku_id: String,
    pub availability_id: String,
    pub billing_cycle: BillingCycleType,
    /// ISO 8601 duration, e.g. `P1M` or `P1Y`.
    pub term_duration: String,
    /// `None` lets the service pick an available promotion. Sent as `null`.
    #[serde(default)]
    pub promotion_id: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ProductTerm {
    /// Target the catalog item identified by `catalog_item`.
    pub fn for_catalog_item(
        catalog_item: &CatalogItemId,
        billing_cycle: BillingCycleType,
        term_duration: String,
        promotion_id: Option<String>,
    ) -> Self {
        Self {
            product_id: catalog_item.product_id.clone(),
            sku_id: catalog_item.sku_id.clone(),
            availability_id: catalog_item.availability_id.clone(),
            billing_cycle,
            term_duration,
            promotion_id,
            extra: ExtraFields::new(),
        }
    }
}

/// Instructions applied to a subscription when its current term ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNextTermInstructions {
    pub product: ProductTerm,
    pub quantity: i32,
    /// `None` keeps the term end date the service would otherwise compute.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_timestamp"
    )]
    pub custom_term_end_date: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ScheduledNextTermInstructions {
    pub fn new(
        product: ProductTerm,
        quantity: i32,
        custom_term_end_date: Option<Timestamp>,
    ) -> Self {
        Self {
            product,
            quantity,
            custom_term_end_date,
            extra: ExtraFields::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A customer subscription as returned by the partner API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_renew_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<BillingCycleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_next_term_instructions: Option<ScheduledNextTermInstructions>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Subscription {
    /// Add one seat. Returns the new quantity, or `None` on overflow
    /// (the subscription is left unchanged).
    pub fn increment_quantity(&mut self) -> Option<i32> {
        let next = self.quantity.checked_add(1)?;
        self.quantity = next;
        Some(next)
    }
}

/// Serde adapter for optional timestamps that tolerates the offset-less
/// forms the service sometimes emits.
mod optional_timestamp {
    use chrono::SecondsFormat;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::input::parse_timestamp;
    use crate::types::Timestamp;

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_timestamp(s)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
