/// Errors raised while interpreting user input or service data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid catalog item ID '{0}': expected productId:skuId:availabilityId")]
    InvalidCatalogItemId(String),

    #[error("Invalid billing cycle '{0}': expected one of {expected}", expected = crate::subscription::BillingCycleType::NAMES.join(", "))]
    InvalidBillingCycle(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate(String),

    #[error("Invalid quantity '{0}': expected a whole number")]
    InvalidQuantity(String),
}
