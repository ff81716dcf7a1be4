//! Audit events for the back office
//!
//! Every state transition an admin triggers is published as an audit event:
//! - Contract events: issued, sent, agreed
//! - Payment events: notice issued, marked paid
//! - Site setting changes
//!
//! Publishing is best-effort; a failing publisher never fails the operation.

use crate::contract::{CreatorContract, PaymentNotice};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// New contract version created
    ContractIssued(ContractEvent),
    /// Contract link sent by email
    ContractSent(ContractEvent),
    /// Creator agreed to a contract
    ContractAgreed(ContractEvent),
    /// Payment notice issued (or re-issued)
    PaymentNoticeIssued(PaymentEvent),
    /// Payment notice paid out
    PaymentMarkedPaid(PaymentEvent),
    /// Site setting written or removed
    SiteSettingChanged(SiteSettingEvent),
}

/// Event data for contract transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    pub contract_id: i64,
    pub creator_id: i64,
    pub version: i32,
    pub timestamp: DateTime<Utc>,
}

/// Event data for payment transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub notice_id: i64,
    pub creator_id: i64,
    /// `YYYY-MM`
    pub period: String,
    pub net_payment: i64,
    pub timestamp: DateTime<Utc>,
}

/// Event data for site setting changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettingEvent {
    pub key: String,
    /// Whether the key was removed rather than written
    pub deleted: bool,
    pub timestamp: DateTime<Utc>,
}

/// Audit publisher trait
#[async_trait::async_trait]
pub trait AuditPublisher: Send + Sync {
    /// Publish an audit event
    async fn publish(&self, event: AuditEvent) -> anyhow::Result<()>;
}

/// No-op publisher for testing or when auditing is disabled
pub struct NoOpAuditPublisher;

#[async_trait::async_trait]
impl AuditPublisher for NoOpAuditPublisher {
    async fn publish(&self, _event: AuditEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Publisher that writes each event as a structured log record on the `audit` target
pub struct TracingAuditPublisher;

#[async_trait::async_trait]
impl AuditPublisher for TracingAuditPublisher {
    async fn publish(&self, event: AuditEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "audit", event = %payload, "audit event");
        Ok(())
    }
}

impl AuditEvent {
    pub fn contract_issued(contract: &CreatorContract) -> Self {
        Self::ContractIssued(ContractEvent::from(contract))
    }

    pub fn contract_sent(contract: &CreatorContract) -> Self {
        Self::ContractSent(ContractEvent::from(contract))
    }

    pub fn contract_agreed(contract: &CreatorContract) -> Self {
        Self::ContractAgreed(ContractEvent::from(contract))
    }

    pub fn notice_issued(notice: &PaymentNotice) -> Self {
        Self::PaymentNoticeIssued(PaymentEvent::from(notice))
    }

    pub fn notice_paid(notice: &PaymentNotice) -> Self {
        Self::PaymentMarkedPaid(PaymentEvent::from(notice))
    }

    pub fn setting_changed(key: &str, deleted: bool) -> Self {
        Self::SiteSettingChanged(SiteSettingEvent {
            key: key.to_string(),
            deleted,
            timestamp: Utc::now(),
        })
    }
}

impl From<&CreatorContract> for ContractEvent {
    fn from(contract: &CreatorContract) -> Self {
        Self {
            contract_id: contract.id,
            creator_id: contract.creator_id,
            version: contract.version,
            timestamp: Utc::now(),
        }
    }
}

impl From<&PaymentNotice> for PaymentEvent {
    fn from(notice: &PaymentNotice) -> Self {
        Self {
            notice_id: notice.id,
            creator_id: notice.creator_id,
            period: notice.period.to_string(),
            net_payment: notice.net_payment,
            timestamp: Utc::now(),
        }
    }
}

/// Publish and swallow failures with a warning
pub(crate) async fn publish_best_effort(publisher: &dyn AuditPublisher, event: AuditEvent) {
    if let Err(e) = publisher.publish(event).await {
        tracing::warn!(error = %e, "Failed to publish audit event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_changed_event_serializes_with_tag() {
        let event = AuditEvent::setting_changed("site_name", false);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "site_setting_changed");
        assert_eq!(json["key"], "site_name");
        assert_eq!(json["deleted"], false);
    }

    #[tokio::test]
    async fn test_noop_publisher() {
        let publisher = NoOpAuditPublisher;
        let result = publisher
            .publish(AuditEvent::setting_changed("site_name", true))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_tracing_publisher() {
        let publisher = TracingAuditPublisher;
        let result = publisher
            .publish(AuditEvent::setting_changed("maintenance_mode", false))
            .await;
        assert!(result.is_ok());
    }
}
