//! PersonSignupHandler - creates or tags a person from a signature or
//! form-submission source.
//!
//! The signup source authenticates at the transport layer, so there is no
//! payload shared secret here. No membership or donation is involved; the
//! handler resolves the person and merges the payload's tags.

use std::sync::Arc;

use crate::application::identity::IdentityResolver;
use crate::application::outcome::{ReconcileOutcome, ReconcileReport};
use crate::domain::foundation::ReconcileError;
use crate::domain::person::{HomeAddress, NormalizedEmail, PersonFields};
use crate::ports::PersonDirectory;

/// Command to reconcile one signup event.
#[derive(Debug, Clone)]
pub struct PersonSignupCommand {
    /// Signer email, raw from the payload.
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Postal code of the signer's primary address.
    pub postal_code: Option<String>,
    /// Country of the signer's primary address.
    pub country: Option<String>,
    /// Tags the source asks to add.
    pub tags: Vec<String>,
}

/// Handler for person-creation events from the signature source.
pub struct PersonSignupHandler {
    directory: Arc<dyn PersonDirectory>,
    resolver: IdentityResolver,
}

impl PersonSignupHandler {
    pub fn new(directory: Arc<dyn PersonDirectory>) -> Self {
        Self {
            resolver: IdentityResolver::new(directory.clone()),
            directory,
        }
    }

    pub async fn handle(
        &self,
        cmd: PersonSignupCommand,
    ) -> Result<ReconcileReport, ReconcileError> {
        let email = NormalizedEmail::parse(&cmd.email)?;

        let mut create_fields = PersonFields {
            first_name: Some(cmd.first_name.unwrap_or_else(|| "Unknown".to_string())),
            last_name: Some(cmd.last_name.unwrap_or_else(|| "Unknown".to_string())),
            home_address: HomeAddress::from_signup(
                cmd.postal_code.as_deref(),
                cmd.country.as_deref(),
            ),
            ..PersonFields::default()
        };
        for tag in &cmd.tags {
            create_fields.add_tag(tag.clone());
        }

        let resolution = self.resolver.resolve(&email, &create_fields, None).await?;

        if resolution.was_created() {
            return Ok(ReconcileReport::new(
                ReconcileOutcome::Created,
                "person created",
            ));
        }

        if cmd.tags.is_empty() {
            return Ok(ReconcileReport::new(
                ReconcileOutcome::Noop,
                "person already exists",
            ));
        }

        let person = resolution.person();
        let mut update_fields = PersonFields::default();
        for tag in &cmd.tags {
            update_fields.add_tag(tag.clone());
        }
        self.directory
            .update_person(person.id, &update_fields)
            .await?;
        tracing::info!(%email, person_id = %person.id, "tagged existing person");

        Ok(ReconcileReport::new(
            ReconcileOutcome::Updated,
            "person updated",
        ))
    }
}
