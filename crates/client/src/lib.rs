//! REST client for the partner-management API.
//!
//! [`PartnerOperations`] is the seam the sample scenarios program
//! against; [`api::PartnerCenterApi`] implements it over HTTPS with
//! [`reqwest`].

pub mod api;
pub mod config;
pub mod error;
pub mod operations;

pub use api::PartnerCenterApi;
pub use config::ClientConfig;
pub use error::PartnerApiError;
pub use operations::PartnerOperations;
