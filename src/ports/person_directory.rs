//! Person directory port.
//!
//! The directory is the system of record for person identity. This engine
//! never deletes a person and never enumerates people; it matches by
//! email, creates, and updates.

use async_trait::async_trait;

use crate::domain::foundation::CrmError;
use crate::domain::person::{NormalizedEmail, Person, PersonFields, PersonId};

/// Port for the external person directory.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Finds the person with exactly this email.
    ///
    /// "No person with that email" is `Ok(None)`, never an error;
    /// implementations absorb the directory's not-found signalling.
    ///
    /// # Errors
    ///
    /// `Service` on transport failure or an unexpected directory response.
    async fn match_by_email(&self, email: &NormalizedEmail) -> Result<Option<Person>, CrmError>;

    /// Creates a person with the given fields.
    ///
    /// # Errors
    ///
    /// `Validation` when the directory rejects the fields. This includes
    /// the email already existing, which is how a concurrent creation
    /// race surfaces.
    async fn create_person(&self, fields: &PersonFields) -> Result<Person, CrmError>;

    /// Updates a person. The directory merges tags additively; fields
    /// absent from `fields` are left untouched.
    async fn update_person(&self, id: PersonId, fields: &PersonFields)
        -> Result<Person, CrmError>;
}
