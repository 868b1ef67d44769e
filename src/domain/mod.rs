//! Pure business types and calculations. No I/O happens in this layer.
//!
//! # Module Structure
//!
//! - `foundation` - errors and timestamps shared across the domain
//! - `person` - identity: emails, contact mapping, the person record
//! - `membership` - membership records and lifecycle planning
//! - `donation` - donation records

pub mod donation;
pub mod foundation;
pub mod membership;
pub mod person;
