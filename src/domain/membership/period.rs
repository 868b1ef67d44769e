//! Membership lifecycle planning.
//!
//! Pure functions from the current membership set and an event to the
//! single write (or no write) that event implies. All date arithmetic for
//! expiries lives here.

use crate::domain::foundation::{ReconcileError, Timestamp};

use super::{Membership, MembershipStatus};

/// Extra day added to every computed expiry. The payment provider and the
/// CRM roll the day over at different times, and without the skew day
/// renewal notices fire a day early. Never applied to cancellation dates.
const ROLLOVER_SKEW_DAYS: i64 = 1;

/// The write a successful payment implies.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentPlan {
    /// No membership of this name exists; create one.
    Create(Membership),
    /// An expiring membership exists; extend it.
    Extend(Membership),
    /// The membership has no end date. It is permanent and is never
    /// rewritten with an expiring window.
    AlreadyPermanent,
}

/// The write a cancellation implies.
#[derive(Debug, Clone, PartialEq)]
pub enum CancellationPlan {
    Cancel(Membership),
    NothingToCancel,
}

/// Picks the person's membership of the given name from a listing.
///
/// # Errors
///
/// More than one membership of the same name is an inconsistency this
/// engine refuses to resolve; it surfaces `AmbiguousMembership` so the
/// records can be cleaned up manually.
pub fn find_current<'a>(
    memberships: &'a [Membership],
    name: &str,
) -> Result<Option<&'a Membership>, ReconcileError> {
    let mut matching = memberships.iter().filter(|m| m.name == name);
    let first = matching.next();
    let extra = matching.count();
    if extra > 0 {
        return Err(ReconcileError::AmbiguousMembership {
            name: name.to_string(),
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Plans the membership write for a successful payment.
///
/// Create: the window starts at the payment's effective date and expires
/// `months` later plus the skew day. Extend: the new window is anchored at
/// whichever is later of the current expiry and the payment date, so a
/// payment arriving before expiry stacks on top of the remaining time, and
/// a payment after a lapse restarts from the payment date. Extension
/// forces the status back to active and replaces the audit note.
pub fn plan_payment(
    current: Option<&Membership>,
    name: &str,
    effective: Timestamp,
    months: u32,
    note: &str,
) -> PaymentPlan {
    let Some(current) = current else {
        return PaymentPlan::Create(Membership {
            id: None,
            name: name.to_string(),
            status: MembershipStatus::Active,
            status_reason: Some(note.to_string()),
            started_at: Some(effective),
            expires_on: Some(expiry_after(effective, months)),
        });
    };

    let Some(current_expiry) = current.expires_on else {
        return PaymentPlan::AlreadyPermanent;
    };

    let base = current_expiry.max(effective);
    PaymentPlan::Extend(Membership {
        status: MembershipStatus::Active,
        status_reason: Some(note.to_string()),
        expires_on: Some(expiry_after(base, months)),
        ..current.clone()
    })
}

/// Plans the membership write for a cancellation.
///
/// The expiry becomes the raw effective date, without the skew day, and no
/// membership means nothing to cancel rather than an error.
pub fn plan_cancellation(
    current: Option<&Membership>,
    effective: Timestamp,
    note: &str,
) -> CancellationPlan {
    match current {
        None => CancellationPlan::NothingToCancel,
        Some(current) => CancellationPlan::Cancel(Membership {
            status: MembershipStatus::Canceled,
            status_reason: Some(note.to_string()),
            expires_on: Some(effective),
            ..current.clone()
        }),
    }
}

fn expiry_after(base: Timestamp, months: u32) -> Timestamp {
    base.add_months(months).add_days(ROLLOVER_SKEW_DAYS)
}
