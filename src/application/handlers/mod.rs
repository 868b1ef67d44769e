//! Reconciliation command handlers - one per inbound event type.
//!
//! Each handler owns the full sequence for its event: shared-secret check,
//! email normalization, identity resolution, and the CRM writes the event
//! implies. Exactly one terminal report or error comes out per event.

mod donation;
mod membership_payment;
mod person_signup;
mod subscription_cancelled;

#[cfg(test)]
pub(crate) mod testing;

pub use donation::{DonationCommand, DonationHandler};
pub use membership_payment::{MembershipPaymentCommand, MembershipPaymentHandler};
pub use person_signup::{PersonSignupCommand, PersonSignupHandler};
pub use subscription_cancelled::{SubscriptionCancelledCommand, SubscriptionCancelledHandler};

/// Memberships fetched per listing call. One page is enough; no person
/// legitimately holds more membership records than this.
pub(crate) const MEMBERSHIP_PAGE_SIZE: u32 = 100;
