//! SubscriptionCancelledHandler - cancels a membership when a recurring
//! subscription ends.
//!
//! Unlike the payment handlers this never creates a person: a cancellation
//! for someone the directory does not know is a no-op, as is one for a
//! person without the membership.

use std::sync::Arc;

use crate::application::outcome::{ReconcileOutcome, ReconcileReport};
use crate::config::SharedSecret;
use crate::domain::foundation::{ReconcileError, Timestamp};
use crate::domain::membership::{
    find_current, plan_cancellation, CampaignCatalog, CancellationPlan,
};
use crate::domain::person::{NormalizedEmail, PersonFields};
use crate::ports::{MembershipStore, PersonDirectory};

use super::MEMBERSHIP_PAGE_SIZE;

const CANCELLED_TAG: &str = "membership_cancelled_via_api";

/// Command to reconcile a cancelled subscription.
#[derive(Debug, Clone)]
pub struct SubscriptionCancelledCommand {
    /// Shared secret echoed by the provider, if any.
    pub secret: Option<String>,
    /// Subscriber email, raw from the payload.
    pub email: String,
    /// Date the provider reports the subscription as cancelled.
    pub effective_date: Timestamp,
    /// Campaign/profile the subscription belonged to.
    pub campaign: Option<String>,
    /// Processor's description of the cancellation.
    pub description: Option<String>,
}

/// Handler for subscription cancellation events.
pub struct SubscriptionCancelledHandler {
    directory: Arc<dyn PersonDirectory>,
    memberships: Arc<dyn MembershipStore>,
    catalog: CampaignCatalog,
    shared_secret: SharedSecret,
}

impl SubscriptionCancelledHandler {
    pub fn new(
        directory: Arc<dyn PersonDirectory>,
        memberships: Arc<dyn MembershipStore>,
        catalog: CampaignCatalog,
        shared_secret: SharedSecret,
    ) -> Self {
        Self {
            directory,
            memberships,
            catalog,
            shared_secret,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubscriptionCancelledCommand,
    ) -> Result<ReconcileReport, ReconcileError> {
        if !self.shared_secret.verify(cmd.secret.as_deref()) {
            return Err(ReconcileError::SecretMismatch);
        }

        let email = NormalizedEmail::parse(&cmd.email)?;
        let selection = self.catalog.select(cmd.campaign.as_deref());

        let mut note = "Membership cancelled via Payment API. ".to_string();
        if let Some(description) = &cmd.description {
            note.push_str(description);
        }

        let Some(person) = self.directory.match_by_email(&email).await? else {
            tracing::warn!(%email, "cannot cancel membership, person does not exist");
            return Ok(ReconcileReport::new(
                ReconcileOutcome::Noop,
                "membership was not cancelled, no person with that email",
            ));
        };

        let memberships = self
            .memberships
            .list_memberships(person.id, MEMBERSHIP_PAGE_SIZE)
            .await?;
        let current = find_current(&memberships, &selection.membership_name)?;

        match plan_cancellation(current, cmd.effective_date, &note) {
            CancellationPlan::NothingToCancel => Ok(ReconcileReport::new(
                ReconcileOutcome::Noop,
                "membership was not cancelled, no existing membership",
            )),
            CancellationPlan::Cancel(membership) => {
                self.memberships
                    .update_membership(person.id, &membership)
                    .await?;
                tracing::info!(
                    %email,
                    membership = %selection.membership_name,
                    "cancelled membership"
                );

                let mut fields = PersonFields::default();
                fields.add_tag(CANCELLED_TAG);
                self.directory.update_person(person.id, &fields).await?;

                Ok(ReconcileReport::new(
                    ReconcileOutcome::Cancelled,
                    "membership cancelled",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::testing::{
        existing_person, FakeDirectory, FakeMembershipStore,
    };
    use crate::domain::membership::{Membership, MembershipStatus};

    fn command() -> SubscriptionCancelledCommand {
        SubscriptionCancelledCommand {
            secret: None,
            email: "jo@example.com".to_string(),
            effective_date: Timestamp::parse("2024-03-10").unwrap(),
            campaign: None,
            description: Some("Subscription ended".to_string()),
        }
    }

    fn handler(
        directory: Arc<FakeDirectory>,
        memberships: Arc<FakeMembershipStore>,
    ) -> SubscriptionCancelledHandler {
        SubscriptionCancelledHandler::new(
            directory,
            memberships,
            CampaignCatalog::new("Member"),
            SharedSecret::disabled(),
        )
    }

    fn membership() -> Membership {
        Membership {
            id: Some(4),
            name: "Member".to_string(),
            status: MembershipStatus::Active,
            status_reason: None,
            started_at: Some(Timestamp::parse("2023-01-15").unwrap()),
            expires_on: Some(Timestamp::parse("2025-01-16").unwrap()),
        }
    }

    #[tokio::test]
    async fn cancels_and_tags_the_person() {
        let directory = Arc::new(
            FakeDirectory::default().with_person(existing_person(9, "jo@example.com")),
        );
        let memberships =
            Arc::new(FakeMembershipStore::default().with_membership(membership()));
        let handler = handler(directory.clone(), memberships.clone());

        let report = handler.handle(command()).await.unwrap();

        assert_eq!(report.outcome, ReconcileOutcome::Cancelled);

        let (_, cancelled) = memberships.updated.lock().unwrap()[0].clone();
        assert_eq!(cancelled.status, MembershipStatus::Canceled);
        // cancellation uses the raw effective date, no skew day
        assert_eq!(cancelled.expires_on.unwrap().to_date_string(), "2024-03-10");
        assert_eq!(
            cancelled.status_reason.as_deref(),
            Some("Membership cancelled via Payment API. Subscription ended")
        );

        let (_, fields) = directory.updates.lock().unwrap()[0].clone();
        assert_eq!(fields.tags, vec![CANCELLED_TAG.to_string()]);
    }

    #[tokio::test]
    async fn unknown_person_is_a_noop_not_an_error() {
        let directory = Arc::new(FakeDirectory::default());
        let memberships = Arc::new(FakeMembershipStore::default());
        let handler = handler(directory.clone(), memberships.clone());

        let report = handler.handle(command()).await.unwrap();

        assert_eq!(report.outcome, ReconcileOutcome::Noop);
        assert_eq!(directory.create_count(), 0);
        assert_eq!(memberships.write_count(), 0);
    }

    #[tokio::test]
    async fn missing_membership_is_a_noop() {
        let directory = Arc::new(
            FakeDirectory::default().with_person(existing_person(9, "jo@example.com")),
        );
        let memberships = Arc::new(FakeMembershipStore::default());
        let handler = handler(directory.clone(), memberships.clone());

        let report = handler.handle(command()).await.unwrap();

        assert_eq!(report.outcome, ReconcileOutcome::Noop);
        assert_eq!(memberships.write_count(), 0);
        assert_eq!(directory.update_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_memberships_refuse_to_act() {
        let directory = Arc::new(
            FakeDirectory::default().with_person(existing_person(9, "jo@example.com")),
        );
        let memberships = Arc::new(
            FakeMembershipStore::default()
                .with_membership(membership())
                .with_membership(membership()),
        );
        let handler = handler(directory, memberships.clone());

        let err = handler.handle(command()).await.unwrap_err();

        assert!(matches!(err, ReconcileError::AmbiguousMembership { .. }));
        assert_eq!(memberships.write_count(), 0);
    }

    #[tokio::test]
    async fn secret_mismatch_is_terminal() {
        let directory = Arc::new(
            FakeDirectory::default().with_person(existing_person(9, "jo@example.com")),
        );
        let memberships =
            Arc::new(FakeMembershipStore::default().with_membership(membership()));
        let handler = SubscriptionCancelledHandler::new(
            directory,
            memberships.clone(),
            CampaignCatalog::new("Member"),
            SharedSecret::new("expected"),
        );

        let err = handler.handle(command()).await.unwrap_err();

        assert_eq!(err, ReconcileError::SecretMismatch);
        assert_eq!(memberships.write_count(), 0);
    }
}
