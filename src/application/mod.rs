//! Application layer - identity resolution and per-event reconciliation.
//!
//! Each inbound event type has one handler under `handlers`; the bounded
//! match-or-create loop they all share lives in `identity`.

pub mod handlers;
mod identity;
mod outcome;

pub use identity::{IdentityResolver, Resolution};
pub use outcome::{ReconcileOutcome, ReconcileReport};
