//! NationBuilder REST adapter.
//!
//! Implements `PersonDirectory`, `MembershipStore` and `DonationStore`
//! against the NationBuilder v1 API.

mod client;
mod wire;

pub use client::NationBuilderClient;
