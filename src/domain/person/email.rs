//! Email normalization and common-typo repair.
//!
//! The directory's email-match endpoint does exact-string matching, so a
//! mistyped domain silently fails to find the person and a duplicate gets
//! created. Normalization lowercases, trims, and repairs the handful of
//! `.com` misspellings seen in real payloads before any lookup happens.

use std::fmt;

use serde::Serialize;

use crate::domain::foundation::ReconcileError;

/// Suffix repairs for common `.com` typos. The suffixes are mutually
/// exclusive, so at most one repair fires per address.
const SUFFIX_REPAIRS: [(&str, &str); 4] = [
    (".con", ".com"),
    (".comp", ".com"),
    (".como", ".com"),
    (".vom", ".com"),
];

/// A lowercased, trimmed, typo-repaired email address.
///
/// This is the only email shape the rest of the engine works with; raw
/// provider strings are normalized exactly once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedEmail(String);

impl NormalizedEmail {
    /// Normalizes a raw email string.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the input is empty or whitespace.
    pub fn parse(raw: &str) -> Result<Self, ReconcileError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReconcileError::validation("email", "must not be empty"));
        }

        let mut email = trimmed.to_lowercase();
        for (typo, fix) in SUFFIX_REPAIRS {
            if let Some(stem) = email.strip_suffix(typo) {
                email = format!("{}{}", stem, fix);
                break;
            }
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
