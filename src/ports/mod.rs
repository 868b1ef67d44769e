//! Ports - Interfaces for the external CRM.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the reconciliation engine and the CRM. Adapters implement these ports.
//!
//! - `PersonDirectory` - person identity records (match, create, update)
//! - `MembershipStore` - membership records per person
//! - `DonationStore` - donation records

mod donation_store;
mod membership_store;
mod person_directory;

pub use donation_store::DonationStore;
pub use membership_store::MembershipStore;
pub use person_directory::PersonDirectory;
