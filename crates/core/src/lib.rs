//! Partner subscription domain types.
//!
//! Models for the subscription, offer and catalog resources returned by the
//! partner-management API, plus the small parsing helpers the sample
//! scenarios use to turn console input into those models.

pub mod collection;
pub mod error;
pub mod input;
pub mod offers;
pub mod subscription;
pub mod types;
