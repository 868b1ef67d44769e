//! MembershipPaymentHandler - reconciles a successful membership payment.
//!
//! Resolves the payer to one person, merges new contact details and tags
//! into pre-existing records, then creates or extends the membership the
//! payment's campaign selects.

use std::sync::Arc;

use crate::application::identity::IdentityResolver;
use crate::application::outcome::{ReconcileOutcome, ReconcileReport};
use crate::config::SharedSecret;
use crate::domain::foundation::{ReconcileError, Timestamp};
use crate::domain::membership::{
    find_current, plan_payment, CampaignCatalog, PaymentPlan,
};
use crate::domain::person::{ContactDetails, NormalizedEmail, PersonFields};
use crate::ports::{MembershipStore, PersonDirectory};

use super::MEMBERSHIP_PAGE_SIZE;

const PROVENANCE_TAG: &str = "created_via_membership_payment";
const RECURRING_TAG: &str = "recurring_membership";

/// Command to reconcile one successful membership payment.
#[derive(Debug, Clone)]
pub struct MembershipPaymentCommand {
    /// Shared secret echoed by the provider, if any.
    pub secret: Option<String>,
    /// Payer email, raw from the payload.
    pub email: String,
    /// Date the provider reports the payment occurred.
    pub effective_date: Timestamp,
    /// Whether the payment is part of a recurring subscription.
    pub recurring: bool,
    /// Campaign/profile the payment came through.
    pub campaign: Option<String>,
    /// Processor's description of the charge.
    pub description: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// The payload's contact block.
    pub contact: ContactDetails,
}

/// Handler for membership payment events.
pub struct MembershipPaymentHandler {
    directory: Arc<dyn PersonDirectory>,
    memberships: Arc<dyn MembershipStore>,
    resolver: IdentityResolver,
    catalog: CampaignCatalog,
    shared_secret: SharedSecret,
}

impl MembershipPaymentHandler {
    pub fn new(
        directory: Arc<dyn PersonDirectory>,
        memberships: Arc<dyn MembershipStore>,
        catalog: CampaignCatalog,
        shared_secret: SharedSecret,
    ) -> Self {
        Self {
            resolver: IdentityResolver::new(directory.clone()),
            directory,
            memberships,
            catalog,
            shared_secret,
        }
    }

    pub async fn handle(
        &self,
        cmd: MembershipPaymentCommand,
    ) -> Result<ReconcileReport, ReconcileError> {
        if !self.shared_secret.verify(cmd.secret.as_deref()) {
            return Err(ReconcileError::SecretMismatch);
        }

        let email = NormalizedEmail::parse(&cmd.email)?;
        let selection = self.catalog.select(cmd.campaign.as_deref());

        let mut note = format!(
            "Membership extended {} month(s) via Payment API. ",
            selection.extension_months
        );
        if let Some(description) = &cmd.description {
            note.push_str(description);
        }

        // Contact details and the recurring tag apply whether the person
        // is created or merely updated; names only ever go on creation.
        let mut update_fields = PersonFields::from_contact(&cmd.contact);
        if cmd.recurring {
            update_fields.add_tag(RECURRING_TAG);
        }

        let mut create_fields = update_fields.clone();
        create_fields.first_name = Some(cmd.first_name.unwrap_or_else(|| "Unknown".to_string()));
        create_fields.last_name = Some(cmd.last_name.unwrap_or_else(|| "Unknown".to_string()));

        let resolution = self
            .resolver
            .resolve(&email, &create_fields, Some(PROVENANCE_TAG))
            .await?;
        let person = resolution.person().clone();

        if !resolution.was_created() {
            self.directory
                .update_person(person.id, &update_fields)
                .await?;
        }

        let memberships = self
            .memberships
            .list_memberships(person.id, MEMBERSHIP_PAGE_SIZE)
            .await?;
        let current = find_current(&memberships, &selection.membership_name)?;

        match plan_payment(
            current,
            &selection.membership_name,
            cmd.effective_date,
            selection.extension_months,
            &note,
        ) {
            PaymentPlan::Create(membership) => {
                self.memberships
                    .create_membership(person.id, &membership)
                    .await?;
                tracing::info!(
                    %email,
                    membership = %selection.membership_name,
                    "created membership"
                );
                Ok(ReconcileReport::new(
                    ReconcileOutcome::Created,
                    "membership created",
                ))
            }
            PaymentPlan::Extend(membership) => {
                self.memberships
                    .update_membership(person.id, &membership)
                    .await?;
                tracing::info!(
                    %email,
                    membership = %selection.membership_name,
                    "extended membership"
                );
                Ok(ReconcileReport::new(
                    ReconcileOutcome::Updated,
                    "membership updated",
                ))
            }
            PaymentPlan::AlreadyPermanent => Ok(ReconcileReport::new(
                ReconcileOutcome::Noop,
                "membership already has no end date",
            )),
        }
    }
}
