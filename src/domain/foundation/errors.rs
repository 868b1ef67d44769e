//! Error types for the reconciliation domain.
//!
//! Two layers: `CrmError` is what the directory/store ports fail with,
//! `ReconcileError` is the single terminal error an event's processing
//! surfaces to the caller. Every port failure aborts the current event;
//! nothing is retried by the core beyond the bounded identity-resolution
//! loop, and no partial result is ever reported as success.

use thiserror::Error;

/// Failure from the external CRM (directory or membership store).
///
/// The "person not found" case is *not* an error: the directory port maps
/// it to `Ok(None)` before it ever reaches the domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrmError {
    /// The CRM rejected the request payload (malformed fields).
    #[error("CRM rejected the request: {0}")]
    Validation(String),

    /// Transport failure or unexpected response from the CRM.
    #[error("CRM call failed: {0}")]
    Service(String),
}

/// Terminal error for one inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// A required input field is missing or malformed. Never retried.
    #[error("field '{field}' is invalid: {message}")]
    Validation { field: String, message: String },

    /// The shared secret sent by the provider does not match configuration.
    #[error("shared secret mismatch")]
    SecretMismatch,

    /// All match-or-create attempts were exhausted without producing a
    /// person. Carries the last underlying create error for diagnostics.
    #[error("could not match or create person '{email}' after {attempts} attempts: {last_error}")]
    IdentityResolutionFailed {
        email: String,
        attempts: u32,
        last_error: String,
    },

    /// More than one membership of the same name exists for a person.
    /// Fatal inconsistency, requires manual cleanup in the CRM.
    #[error("{count} '{name}' memberships found for one person, refusing to act")]
    AmbiguousMembership { name: String, count: usize },

    /// A directory/store call failed and the event was aborted.
    #[error(transparent)]
    External(#[from] CrmError),
}

impl ReconcileError {
    /// Creates a validation error for a specific input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReconcileError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_field_and_reason() {
        let err = ReconcileError::validation("email", "must not be empty");
        assert_eq!(
            format!("{}", err),
            "field 'email' is invalid: must not be empty"
        );
    }

    #[test]
    fn identity_resolution_failure_carries_last_error() {
        let err = ReconcileError::IdentityResolutionFailed {
            email: "jo@example.com".to_string(),
            attempts: 3,
            last_error: "CRM call failed: timeout".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("jo@example.com"));
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn crm_error_converts_to_external() {
        let err: ReconcileError = CrmError::Service("boom".to_string()).into();
        assert!(matches!(err, ReconcileError::External(CrmError::Service(_))));
    }

    #[test]
    fn ambiguous_membership_displays_name_and_count() {
        let err = ReconcileError::AmbiguousMembership {
            name: "Member".to_string(),
            count: 2,
        };
        assert_eq!(
            format!("{}", err),
            "2 'Member' memberships found for one person, refusing to act"
        );
    }
}
