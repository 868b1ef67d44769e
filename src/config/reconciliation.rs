//! Reconciliation policy configuration

use serde::Deserialize;

use crate::domain::donation::TrackingCodeStyle;
use crate::domain::membership::{CampaignCatalog, CampaignOverride};

use super::error::ValidationError;
use super::secrets::SharedSecret;

fn default_extension_months() -> u32 {
    12
}

/// Policy knobs for the reconciliation handlers: which membership payments
/// buy by default, per-campaign overrides, per-route shared secrets, and
/// donation bookkeeping options.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Membership name created/extended when no campaign override matches
    pub membership_name: String,

    /// Months a payment extends a membership by default
    #[serde(default = "default_extension_months")]
    pub extension_months: u32,

    /// Campaign-specific membership name / extension length overrides
    #[serde(default)]
    pub campaign_overrides: Vec<CampaignOverride>,

    /// Shared secret the payment provider sends on membership routes
    #[serde(default)]
    pub membership_shared_secret: SharedSecret,

    /// Shared secret the payment provider sends on the donation route
    #[serde(default)]
    pub donation_shared_secret: SharedSecret,

    /// How donation tracking codes are derived from the profile name
    #[serde(default)]
    pub tracking_code_style: TrackingCodeStyle,

    /// Optional site-defined donation field recording recurrence
    #[serde(default)]
    pub recurrence_custom_field: Option<String>,
}

impl ReconciliationConfig {
    /// Builds the campaign catalog the membership handlers consult.
    pub fn campaign_catalog(&self) -> CampaignCatalog {
        CampaignCatalog {
            default_membership_name: self.membership_name.clone(),
            default_extension_months: self.extension_months,
            overrides: self.campaign_overrides.clone(),
        }
    }

    /// Validate reconciliation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.membership_name.is_empty() {
            return Err(ValidationError::MissingRequired("MEMBERSHIP_NAME"));
        }
        if self.extension_months == 0 {
            return Err(ValidationError::InvalidExtensionMonths);
        }
        if self
            .campaign_overrides
            .iter()
            .any(|entry| entry.campaign.is_empty())
        {
            return Err(ValidationError::EmptyCampaignOverride);
        }
        Ok(())
    }
}
