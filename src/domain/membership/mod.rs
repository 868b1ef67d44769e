//! Membership domain.
//!
//! # Module Structure
//!
//! - `membership` - the CRM membership record and its status
//! - `period` - lifecycle transition planning and expiry date arithmetic
//! - `campaign` - campaign to membership name / extension length mapping

mod campaign;
mod membership;
mod period;

pub use campaign::{CampaignCatalog, CampaignOverride, CampaignSelection};
pub use membership::{Membership, MembershipStatus};
pub use period::{find_current, plan_cancellation, plan_payment, CancellationPlan, PaymentPlan};
