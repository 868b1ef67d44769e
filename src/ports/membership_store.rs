//! Membership store port.

use async_trait::async_trait;

use crate::domain::foundation::CrmError;
use crate::domain::membership::Membership;
use crate::domain::person::PersonId;

/// Port for a person's membership records.
///
/// Memberships are never deleted by this engine; cancellation is an
/// update that flips the status.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Lists a person's memberships, up to `page_size` records.
    async fn list_memberships(
        &self,
        person: PersonId,
        page_size: u32,
    ) -> Result<Vec<Membership>, CrmError>;

    /// Creates a membership for a person.
    async fn create_membership(
        &self,
        person: PersonId,
        membership: &Membership,
    ) -> Result<Membership, CrmError>;

    /// Updates an existing membership. The record's `id`, when present,
    /// addresses the row; the store merges the fields sent.
    async fn update_membership(
        &self,
        person: PersonId,
        membership: &Membership,
    ) -> Result<Membership, CrmError>;
}
