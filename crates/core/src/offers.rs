//! Transition eligibility and catalog availability resources.
//!
//! A scheduled change targets a catalog item, identified by
//! `productId:skuId:availabilityId`. The service first reports which
//! catalog items a subscription may transition to, then the chosen
//! item's availability lists the terms that can be requested.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collection::ResourceCollection;
use crate::error::CoreError;
use crate::types::ExtraFields;

// ---------------------------------------------------------------------------
// Catalog item ID
// ---------------------------------------------------------------------------

/// Separator between the segments of a catalog item ID.
pub const CATALOG_ITEM_SEPARATOR: char = ':';

/// A catalog item ID split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItemId {
    pub product_id: String,
    pub sku_id: String,
    pub availability_id: String,
}

impl FromStr for CatalogItemId {
    type Err = CoreError;

    /// Exactly three non-empty segments are required.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(CATALOG_ITEM_SEPARATOR).collect();

        match parts.as_slice() {
            [product, sku, availability]
                if !product.is_empty() && !sku.is_empty() && !availability.is_empty() =>
            {
                Ok(Self {
                    product_id: (*product).to_string(),
                    sku_id: (*sku).to_string(),
                    availability_id: (*availability).to_string(),
                })
            }
            _ => Err(CoreError::InvalidCatalogItemId(s.to_string())),
        }
    }
}

impl fmt::Display for CatalogItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.product_id,
            self.sku_id,
            self.availability_id,
            sep = CATALOG_ITEM_SEPARATOR
        )
    }
}

// ---------------------------------------------------------------------------
// Transition eligibility
// ---------------------------------------------------------------------------

/// When a transition takes effect. Sent as the `eligibilityType` query
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EligibilityType {
    Immediate,
    Scheduled,
}

impl EligibilityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Scheduled => "scheduled",
        }
    }
}

/// Reason a transition is not allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityError {
    /// Numeric or symbolic depending on the service version.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    #[serde(default)]
    pub is_eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<EligibilityError>,
}

/// A catalog item the subscription may transition to, with the checks the
/// service ran against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEligibility {
    pub catalog_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub eligibilities: Vec<Eligibility>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl TransitionEligibility {
    /// At least one of the service's checks allows the transition.
    pub fn is_eligible(&self) -> bool {
        self.eligibilities.iter().any(|e| e.is_eligible)
    }
}

impl ResourceCollection<TransitionEligibility> {
    /// First entry whose catalog item ID matches exactly.
    pub fn find_catalog_item(&self, catalog_item_id: &str) -> Option<&TransitionEligibility> {
        self.items
            .iter()
            .find(|item| item.catalog_item_id == catalog_item_id)
    }
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// A purchasable term of a catalog availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemTerm {
    /// ISO 8601 duration, e.g. `P1Y`.
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_item_id: Option<String>,
    #[serde(default)]
    pub terms: Vec<CatalogItemTerm>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
