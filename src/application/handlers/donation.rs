//! DonationHandler - records a successful donation against a person.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::application::identity::IdentityResolver;
use crate::application::outcome::{ReconcileOutcome, ReconcileReport};
use crate::config::SharedSecret;
use crate::domain::donation::{Donation, TrackingCodeStyle};
use crate::domain::foundation::{ReconcileError, Timestamp};
use crate::domain::person::{ContactDetails, NormalizedEmail, PersonFields};
use crate::ports::{DonationStore, PersonDirectory};

const PROVENANCE_TAG: &str = "created_via_donation_payment";
const PAYMENT_TYPE: &str = "Credit Card";

/// Command to record one successful donation.
#[derive(Debug, Clone)]
pub struct DonationCommand {
    /// Shared secret echoed by the provider, if any.
    pub secret: Option<String>,
    /// Donor email, raw from the payload.
    pub email: String,
    /// Donation amount in cents.
    pub amount_in_cents: i64,
    /// Date the provider reports the donation succeeded.
    pub effective_date: Timestamp,
    /// Whether the donation is part of a recurring subscription.
    pub recurring: bool,
    /// Campaign/profile the donation came through.
    pub campaign: Option<String>,
    /// Processor's description of the charge.
    pub description: Option<String>,
    /// Donor's free-text message.
    pub message: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// The payload's contact block.
    pub contact: ContactDetails,
}

/// Handler for donation events.
pub struct DonationHandler {
    directory: Arc<dyn PersonDirectory>,
    donations: Arc<dyn DonationStore>,
    resolver: IdentityResolver,
    shared_secret: SharedSecret,
    tracking_code_style: TrackingCodeStyle,
    recurrence_custom_field: Option<String>,
}

impl DonationHandler {
    pub fn new(
        directory: Arc<dyn PersonDirectory>,
        donations: Arc<dyn DonationStore>,
        shared_secret: SharedSecret,
        tracking_code_style: TrackingCodeStyle,
        recurrence_custom_field: Option<String>,
    ) -> Self {
        Self {
            resolver: IdentityResolver::new(directory.clone()),
            directory,
            donations,
            shared_secret,
            tracking_code_style,
            recurrence_custom_field,
        }
    }

    pub async fn handle(&self, cmd: DonationCommand) -> Result<ReconcileReport, ReconcileError> {
        if !self.shared_secret.verify(cmd.secret.as_deref()) {
            return Err(ReconcileError::SecretMismatch);
        }

        let email = NormalizedEmail::parse(&cmd.email)?;

        let update_fields = PersonFields::from_contact(&cmd.contact);
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

        let mut custom_fields = BTreeMap::new();
        if let Some(field) = &self.recurrence_custom_field {
            custom_fields.insert(field.clone(), serde_json::json!(cmd.recurring));
        }

        let donation = Donation {
            donor_id: person.id,
            amount_in_cents: cmd.amount_in_cents,
            payment_type_name: PAYMENT_TYPE.to_string(),
            note: Donation::compose_note(cmd.description.as_deref(), cmd.message.as_deref()),
            succeeded_at: cmd.effective_date,
            tracking_code_slug: self.tracking_code_style.render(cmd.campaign.as_deref()),
            custom_fields,
        };

        self.donations.create_donation(&donation).await?;
        tracing::info!(%email, amount_in_cents = cmd.amount_in_cents, "added donation");

        Ok(ReconcileReport::new(
            ReconcileOutcome::Created,
            "donation created",
        ))
    }
}
