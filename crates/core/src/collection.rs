use serde::{Deserialize, Serialize};

use crate::types::ExtraFields;

/// A page of resources as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCollection<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl<T> ResourceCollection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            total_count: Some(items.len() as i64),
            items,
            extra: ExtraFields::new(),
        }
    }

    /// Reported total, falling back to the number of items received.
    pub fn total_count(&self) -> i64 {
        self.total_count.unwrap_or(self.items.len() as i64)
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() <= 0
    }
}
