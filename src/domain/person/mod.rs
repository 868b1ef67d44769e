//! Person identity domain.
//!
//! # Module Structure
//!
//! - `email` - email normalization and common-typo repair
//! - `contact` - mapping heterogeneous payload contact blocks to CRM fields
//! - `person` - the directory's person record

mod contact;
mod email;
mod person;

pub use contact::{BillingAddress, ContactDetails, HomeAddress, PersonFields};
pub use email::NormalizedEmail;
pub use person::{Person, PersonId};
