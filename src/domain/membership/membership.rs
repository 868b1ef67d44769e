//! The CRM membership record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Membership status as the CRM stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Canceled,
    /// Statuses this engine never writes but may read back.
    #[serde(other)]
    Unknown,
}

/// A named, time-bounded membership attached to a person.
///
/// `expires_on` absent means the membership never expires. `id` is absent
/// on records this engine builds and present on records read from the
/// store; it is passed through on update so the store can address the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub status: MembershipStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<Timestamp>,
}
