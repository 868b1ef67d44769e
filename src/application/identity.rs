//! Bounded match-or-create identity resolution.
//!
//! Webhooks for the same external event are frequently delivered more than
//! once, near-simultaneously, so a plain check-then-create races: two
//! deliveries both miss the lookup and both try to create. The loop here
//! retries the lookup after a failed create, bounded at three attempts,
//! which narrows (not closes) the duplicate-creation window. Uniqueness
//! itself is the directory's responsibility.

use std::sync::Arc;

use crate::domain::foundation::ReconcileError;
use crate::domain::person::{NormalizedEmail, Person, PersonFields};
use crate::ports::PersonDirectory;

const MAX_ATTEMPTS: u32 = 3;

/// How the person was obtained. Callers need the distinction because a
/// matched person still needs its fields/tags merged via an update, while
/// a created person was already written with them.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Matched(Person),
    Created(Person),
}

impl Resolution {
    pub fn person(&self) -> &Person {
        match self {
            Resolution::Matched(person) | Resolution::Created(person) => person,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Resolution::Created(_))
    }
}

/// Resolves an email to exactly one person record, creating one if absent.
pub struct IdentityResolver {
    directory: Arc<dyn PersonDirectory>,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn PersonDirectory>) -> Self {
        Self { directory }
    }

    /// Matches by email or creates the person with `create_fields` plus
    /// the provenance tag, up to three attempts.
    ///
    /// A matched person is returned untouched; merging new fields into a
    /// pre-existing record is the caller's job. Lookup failures abort
    /// immediately; only create failures are retried, since they are the
    /// signature of a concurrent creation.
    ///
    /// # Errors
    ///
    /// `External` on a lookup failure, `IdentityResolutionFailed` when
    /// every attempt is exhausted, carrying the last create error.
    pub async fn resolve(
        &self,
        email: &NormalizedEmail,
        create_fields: &PersonFields,
        provenance_tag: Option<&str>,
    ) -> Result<Resolution, ReconcileError> {
        let mut fields = create_fields.clone();
        fields.email = Some(email.as_str().to_string());
        if let Some(tag) = provenance_tag {
            fields.add_tag(tag);
        }

        let mut last_error = None;

        for attempt in 1..=MAX_ATTEMPTS {
            if let Some(person) = self.directory.match_by_email(email).await? {
                return Ok(Resolution::Matched(person));
            }

            match self.directory.create_person(&fields).await {
                Ok(person) => {
                    tracing::info!(%email, person_id = %person.id, "created person");
                    return Ok(Resolution::Created(person));
                }
                Err(err) => {
                    tracing::warn!(%email, attempt, error = %err, "create person failed");
                    last_error = Some(err);
                }
            }
        }

        Err(ReconcileError::IdentityResolutionFailed {
            email: email.as_str().to_string(),
            attempts: MAX_ATTEMPTS,
            last_error: last_error
                .map(|err| err.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }
}
