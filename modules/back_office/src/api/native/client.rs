//! Native client implementation - wraps domain services for in-process calls

use crate::contract::{BackOfficeApi, BackOfficeError, CommissionTerms, PaymentNotice, Period};
use crate::domain::Services;
use async_trait::async_trait;

/// Native client that calls the domain services directly, without HTTP
#[derive(Clone)]
pub struct NativeClient {
    services: Services,
}

impl NativeClient {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}

#[async_trait]
impl BackOfficeApi for NativeClient {
    async fn get_site_setting(&self, key: &str, default: &str) -> Result<String, BackOfficeError> {
        self.services.settings.get(key, default).await
    }

    async fn effective_terms(&self, creator_id: i64) -> Result<CommissionTerms, BackOfficeError> {
        self.services.contracts.effective_terms(creator_id).await
    }

    async fn preview_payment(
        &self,
        creator_id: i64,
        period: Period,
    ) -> Result<PaymentNotice, BackOfficeError> {
        self.services.payments.preview(creator_id, period).await
    }
}
