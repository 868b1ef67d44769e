//! Donation store port.

use async_trait::async_trait;

use crate::domain::donation::Donation;
use crate::domain::foundation::CrmError;

/// Port for recording donations against people.
#[async_trait]
pub trait DonationStore: Send + Sync {
    /// Records a donation. Nothing in the engine reads donations back,
    /// so only acceptance is reported.
    ///
    /// # Errors
    ///
    /// `Validation` when the store rejects the record, `Service` on
    /// transport failure.
    async fn create_donation(&self, donation: &Donation) -> Result<(), CrmError>;
}
