//! Campaign to membership name and extension length mapping.
//!
//! Which membership a payment buys, and for how long, depends on the
//! campaign/profile the payment came through. The mapping is configuration
//! injected at construction, not ambient state read inside business logic.

use serde::Deserialize;

const DEFAULT_EXTENSION_MONTHS: u32 = 12;

/// One campaign-specific override. Either field may be left unset to keep
/// the catalog default for that dimension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CampaignOverride {
    pub campaign: String,
    #[serde(default)]
    pub membership_name: Option<String>,
    #[serde(default)]
    pub extension_months: Option<u32>,
}

/// The membership name and extension length selected for one payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSelection {
    pub membership_name: String,
    pub extension_months: u32,
}

/// Campaign lookup table with a fixed fallback default.
///
/// Overrides are evaluated before the default, first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CampaignCatalog {
    pub default_membership_name: String,
    #[serde(default = "default_months")]
    pub default_extension_months: u32,
    #[serde(default)]
    pub overrides: Vec<CampaignOverride>,
}

fn default_months() -> u32 {
    DEFAULT_EXTENSION_MONTHS
}

impl CampaignCatalog {
    pub fn new(default_membership_name: impl Into<String>) -> Self {
        Self {
            default_membership_name: default_membership_name.into(),
            default_extension_months: DEFAULT_EXTENSION_MONTHS,
            overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, entry: CampaignOverride) -> Self {
        self.overrides.push(entry);
        self
    }

    /// Selects the membership name and extension length for a payment's
    /// campaign. A missing or unrecognized campaign gets the defaults.
    pub fn select(&self, campaign: Option<&str>) -> CampaignSelection {
        let matched = campaign
            .and_then(|name| self.overrides.iter().find(|entry| entry.campaign == name));

        CampaignSelection {
            membership_name: matched
                .and_then(|entry| entry.membership_name.clone())
                .unwrap_or_else(|| self.default_membership_name.clone()),
            extension_months: matched
                .and_then(|entry| entry.extension_months)
                .unwrap_or(self.default_extension_months),
        }
    }
}
