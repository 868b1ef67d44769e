//! Mapping heterogeneous provider contact blocks into the CRM's person
//! field contract.
//!
//! Payment payloads carry a `private` sub-object that uses either the
//! standard field names (`street_address`, `suburb`, ...) or an alternate
//! set one payment path emits (`textAddress1`, `textSuburb`, ...). The
//! fallback is resolved here, once, so nothing downstream has to know two
//! shapes exist.

use serde::{Deserialize, Serialize};

/// CRM constraint: postal codes are at most 10 characters.
const MAX_ZIP_LEN: usize = 10;

/// Contact block as it appears in a payment payload. Both the standard and
/// the alternate field sets deserialize into the one struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactDetails {
    pub street_address: Option<String>,
    pub suburb: Option<String>,
    pub postcode: Option<String>,
    pub state: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<String>,
    #[serde(rename = "textAddress1")]
    pub text_address1: Option<String>,
    #[serde(rename = "textSuburb")]
    pub text_suburb: Option<String>,
    #[serde(rename = "textState")]
    pub text_state: Option<String>,
    #[serde(rename = "textPostcode")]
    pub text_postcode: Option<String>,
}

/// Billing address in the CRM's shape. The provider's suburb lands in
/// `address2` because the CRM has no suburb field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Home address used by the signature/submission source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl HomeAddress {
    /// Builds a home address from a signup payload's postal fields.
    ///
    /// The postal code is truncated to the CRM limit, and US codes shorter
    /// than 5 characters are dropped (the CRM rejects them as invalid
    /// zips). Returns `None` when neither field survives.
    pub fn from_signup(postal_code: Option<&str>, country: Option<&str>) -> Option<Self> {
        let country_code = non_empty(country);
        let zip = non_empty(postal_code).map(truncate_zip).filter(|zip| {
            country_code.as_deref() != Some("US") || zip.len() >= 5
        });
        if zip.is_none() && country_code.is_none() {
            return None;
        }
        Some(Self { zip, country_code })
    }
}

/// The writable subset of a CRM person record. Absent fields are omitted
/// from serialization entirely, never sent as empty strings, so the CRM's
/// additive update semantics leave unrelated fields alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<BillingAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_address: Option<HomeAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl PersonFields {
    /// Maps a payment payload's contact block: phone, birthdate, and the
    /// billing address, each omitted when the source has nothing usable.
    pub fn from_contact(contact: &ContactDetails) -> Self {
        Self {
            phone: non_empty(contact.phone_number.as_deref()),
            birthdate: contact
                .date_of_birth
                .as_deref()
                .and_then(normalize_birthdate),
            billing_address: contact.billing_address(),
            ..Self::default()
        }
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }
}

impl ContactDetails {
    /// Resolves the billing address, preferring each standard field over
    /// its alternate. Returns `None` when all four sources are empty.
    pub fn billing_address(&self) -> Option<BillingAddress> {
        let address1 = pick(&self.street_address, &self.text_address1);
        let address2 = pick(&self.suburb, &self.text_suburb);
        let state = pick(&self.state, &self.text_state);
        let zip = pick(&self.postcode, &self.text_postcode).map(truncate_zip);

        if address1.is_none() && address2.is_none() && state.is_none() && zip.is_none() {
            return None;
        }
        Some(BillingAddress {
            address1,
            address2,
            state,
            zip,
        })
    }
}

fn pick(standard: &Option<String>, alternate: &Option<String>) -> Option<String> {
    non_empty(standard.as_deref()).or_else(|| non_empty(alternate.as_deref()))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn truncate_zip(zip: String) -> String {
    zip.chars().take(MAX_ZIP_LEN).collect()
}

/// Normalizes a date of birth to ISO `YYYY-MM-DD`.
///
/// `DD/MM/YYYY` (detected by the `/`) has its components reversed; a value
/// that still fails to parse as a date is dropped rather than failing the
/// whole event.
fn normalize_birthdate(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let iso = if raw.contains('/') {
        let mut parts: Vec<&str> = raw.split('/').collect();
        parts.reverse();
        parts.join("-")
    } else {
        raw.to_string()
    };
    chrono::NaiveDate::parse_from_str(&iso, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%Y-%m-%d").to_string())
}
