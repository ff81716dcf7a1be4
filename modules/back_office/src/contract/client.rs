//! Native client trait for inter-module communication
//!
//! Other modules (storefront, mailers) read configuration and payout figures
//! through this trait. NO HTTP - direct function calls.

use super::{
    error::BackOfficeError,
    model::{CommissionTerms, PaymentNotice, Period},
};
use async_trait::async_trait;

/// Back office API for inter-module communication
#[async_trait]
pub trait BackOfficeApi: Send + Sync {
    /// Read a site setting, falling back to `default` when unset
    async fn get_site_setting(&self, key: &str, default: &str) -> Result<String, BackOfficeError>;

    /// Commission terms currently in force for a creator
    async fn effective_terms(&self, creator_id: i64) -> Result<CommissionTerms, BackOfficeError>;

    /// Compute (without saving) a creator's payment notice for a period
    async fn preview_payment(
        &self,
        creator_id: i64,
        period: Period,
    ) -> Result<PaymentNotice, BackOfficeError>;
}
