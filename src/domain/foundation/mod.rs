//! Shared domain primitives.
//!
//! - `errors` - reconciliation and CRM error taxonomy
//! - `timestamp` - UTC timestamp value object with CRM formatting rules

mod errors;
mod timestamp;

pub use errors::{CrmError, ReconcileError};
pub use timestamp::Timestamp;
