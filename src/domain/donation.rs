//! Donation record written to the CRM for successful payments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::person::PersonId;

/// How the donation's tracking code is derived from the payment's
/// campaign/profile name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingCodeStyle {
    /// Use the profile name verbatim.
    #[default]
    ProfileName,
    /// Lowercase, strip apostrophes, replace spaces with underscores.
    ProfileNameAsSlug,
}

impl TrackingCodeStyle {
    /// Renders a tracking code from the profile name. A missing profile
    /// name yields an empty code, which the CRM accepts.
    pub fn render(&self, profile_name: Option<&str>) -> String {
        let name = profile_name.unwrap_or_default();
        match self {
            TrackingCodeStyle::ProfileName => name.to_string(),
            TrackingCodeStyle::ProfileNameAsSlug => name
                .to_lowercase()
                .replace('\'', "")
                .replace(' ', "_"),
        }
    }
}

/// A donation in the CRM's shape. Custom fields flatten into the top-level
/// object, which is how the CRM expects site-defined donation fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Donation {
    pub donor_id: PersonId,
    pub amount_in_cents: i64,
    pub payment_type_name: String,
    pub note: String,
    pub succeeded_at: Timestamp,
    pub tracking_code_slug: String,
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
}

impl Donation {
    /// Joins the processor's description and the donor's optional message
    /// into the audit note.
    pub fn compose_note(description: Option<&str>, message: Option<&str>) -> String {
        let description = description.unwrap_or_default();
        match message.filter(|m| !m.is_empty()) {
            Some(message) => format!("{} - {}", description, message),
            None => description.to_string(),
        }
    }
}
