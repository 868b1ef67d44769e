//! NationBuilder v1 wire shapes.
//!
//! Every record travels inside a single-key envelope (`{"person": ...}`,
//! `{"membership": ...}`, `{"donation": ...}`); listings come back under
//! `"results"`. Error bodies carry a `code` the client inspects, most
//! importantly `no_matches` from the email-match endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::donation::Donation;
use crate::domain::membership::Membership;
use crate::domain::person::{Person, PersonFields};

#[derive(Debug, Serialize)]
pub(crate) struct PersonEnvelope<'a> {
    pub person: &'a PersonFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonResponse {
    pub person: Person,
}

#[derive(Debug, Serialize)]
pub(crate) struct MembershipEnvelope<'a> {
    pub membership: &'a Membership,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MembershipResponse {
    pub membership: Membership,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MembershipListResponse {
    pub results: Vec<Membership>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DonationEnvelope<'a> {
    pub donation: &'a Donation,
}

/// The body NationBuilder sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub validation_errors: Option<Vec<String>>,
}

impl ApiErrorBody {
    pub(crate) fn detail(&self) -> String {
        match (&self.message, &self.validation_errors) {
            (Some(message), Some(errors)) if !errors.is_empty() => {
                format!("{} ({})", message, errors.join(", "))
            }
            (Some(message), _) => message.clone(),
            (None, Some(errors)) if !errors.is_empty() => errors.join(", "),
            _ => self.code.clone().unwrap_or_else(|| "unknown".to_string()),
        }
    }
}
