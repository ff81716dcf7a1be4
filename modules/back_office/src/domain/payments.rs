//! Payment notices and sales reporting

use super::archive::{ArchiveError, DocumentArchive};
use super::commission::{calculate, CommissionInput};
use super::contracts::ContractService;
use super::events::{publish_best_effort, AuditEvent, AuditPublisher};
use super::repository::{CreatorRepository, PaymentRepository, SalesRepository};
use crate::contract::{
    BackOfficeError, Creator, CreatorSales, PaymentNotice, PaymentStatus, Period,
};
use chrono::Utc;
use std::fmt::Write as _;
use std::sync::Arc;

/// Domain service for payouts
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    sales: Arc<dyn SalesRepository>,
    creators: Arc<dyn CreatorRepository>,
    contracts: Arc<ContractService>,
    archive: Arc<dyn DocumentArchive>,
    audit: Arc<dyn AuditPublisher>,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        sales: Arc<dyn SalesRepository>,
        creators: Arc<dyn CreatorRepository>,
        contracts: Arc<ContractService>,
        archive: Arc<dyn DocumentArchive>,
        audit: Arc<dyn AuditPublisher>,
    ) -> Self {
        Self {
            payments,
            sales,
            creators,
            contracts,
            archive,
            audit,
        }
    }

    /// Per-creator sales of a period
    pub async fn period_report(&self, period: Period) -> Result<Vec<CreatorSales>, BackOfficeError> {
        self.sales
            .period_sales(period)
            .await
            .map_err(BackOfficeError::internal)
    }

    /// Compute a creator's notice for a period without saving it
    pub async fn preview(
        &self,
        creator_id: i64,
        period: Period,
    ) -> Result<PaymentNotice, BackOfficeError> {
        let creator = self
            .creators
            .find_by_id(creator_id)
            .await
            .map_err(BackOfficeError::internal)?
            .ok_or_else(|| BackOfficeError::not_found("creator", creator_id))?;
        self.compute(&creator, period).await
    }

    /// Compute and persist a notice; replaces an unpaid notice for the same period
    pub async fn issue(
        &self,
        creator_id: i64,
        period: Period,
    ) -> Result<PaymentNotice, BackOfficeError> {
        let existing = self
            .payments
            .find_for_period(creator_id, period)
            .await
            .map_err(BackOfficeError::internal)?;
        if let Some(existing) = &existing {
            if existing.status == PaymentStatus::Paid {
                return Err(BackOfficeError::conflict(format!(
                    "payment for creator {} in {} is already paid",
                    creator_id, period
                )));
            }
        }

        let mut notice = self.preview(creator_id, period).await?;
        notice.id = existing.map(|n| n.id).unwrap_or(0);
        notice.status = PaymentStatus::Issued;
        notice.issued_at = Some(Utc::now());

        let saved = self
            .payments
            .save(&notice)
            .await
            .map_err(BackOfficeError::internal)?;

        tracing::info!(
            creator_id,
            period = %period,
            net_payment = saved.net_payment,
            "payment notice issued"
        );
        publish_best_effort(self.audit.as_ref(), AuditEvent::notice_issued(&saved)).await;
        Ok(saved)
    }

    pub async fn mark_paid(&self, notice_id: i64) -> Result<PaymentNotice, BackOfficeError> {
        let mut notice = self.get(notice_id).await?;
        if notice.status == PaymentStatus::Paid {
            return Err(BackOfficeError::conflict(format!(
                "payment notice {} is already paid",
                notice_id
            )));
        }

        let paid_at = Utc::now();
        self.payments
            .mark_paid(notice_id, paid_at)
            .await
            .map_err(BackOfficeError::internal)?;
        notice.status = PaymentStatus::Paid;
        notice.paid_at = Some(paid_at);

        tracing::info!(notice_id, creator_id = notice.creator_id, "payment marked paid");
        publish_best_effort(self.audit.as_ref(), AuditEvent::notice_paid(&notice)).await;
        Ok(notice)
    }

    pub async fn get(&self, notice_id: i64) -> Result<PaymentNotice, BackOfficeError> {
        self.payments
            .find_by_id(notice_id)
            .await
            .map_err(BackOfficeError::internal)?
            .ok_or_else(|| BackOfficeError::not_found("payment_notice", notice_id))
    }

    pub async fn list(&self, period: Period) -> Result<Vec<PaymentNotice>, BackOfficeError> {
        self.payments
            .list_for_period(period)
            .await
            .map_err(BackOfficeError::internal)
    }

    /// Upload the rendered statement into the archive's folder for the notice period
    pub async fn archive(&self, notice_id: i64) -> Result<PaymentNotice, BackOfficeError> {
        let mut notice = self.get(notice_id).await?;
        if !self.archive.is_connected().await {
            return Err(BackOfficeError::ArchiveUnavailable);
        }

        let creator = self
            .creators
            .find_by_id(notice.creator_id)
            .await
            .map_err(BackOfficeError::internal)?
            .ok_or_else(|| BackOfficeError::not_found("creator", notice.creator_id))?;

        let folder = self
            .archive
            .monthly_folder(notice.period)
            .await
            .map_err(map_archive_error)?;
        let file_name = statement_file_name(&notice);
        let body = render_statement(&creator, &notice);
        let file_id = self
            .archive
            .upload(&folder, &file_name, body.as_bytes())
            .await
            .map_err(map_archive_error)?;

        self.payments
            .set_archive_file(notice_id, &file_id)
            .await
            .map_err(BackOfficeError::internal)?;
        notice.archive_file_id = Some(file_id);

        tracing::info!(notice_id, folder = %folder.name, file = %file_name, "payment statement archived");
        Ok(notice)
    }

    async fn compute(
        &self,
        creator: &Creator,
        period: Period,
    ) -> Result<PaymentNotice, BackOfficeError> {
        let sales = self
            .sales
            .creator_sales(creator.id, period)
            .await
            .map_err(BackOfficeError::internal)?;
        let terms = self.contracts.terms_for(creator).await?;

        let breakdown = calculate(&CommissionInput {
            gross_sales: sales.gross_sales,
            item_count: sales.item_count,
            terms,
            business_type: creator.business_type,
            withholding_required: creator.withholding_required,
        });

        Ok(PaymentNotice {
            id: 0,
            creator_id: creator.id,
            period,
            sales,
            terms,
            commission_by_rate: breakdown.commission_by_rate,
            commission_by_item: breakdown.commission_by_item,
            total_commission: breakdown.total_commission,
            withholding_tax: breakdown.withholding_tax,
            net_payment: breakdown.net_payment,
            status: PaymentStatus::Draft,
            issued_at: None,
            paid_at: None,
            archive_file_id: None,
        })
    }
}

fn map_archive_error(error: ArchiveError) -> BackOfficeError {
    match error {
        ArchiveError::NotConnected => BackOfficeError::ArchiveUnavailable,
        other => BackOfficeError::internal(other.into()),
    }
}

pub fn statement_file_name(notice: &PaymentNotice) -> String {
    format!("payment_{}_creator{}.txt", notice.period, notice.creator_id)
}

/// Plain-text payment statement
pub fn render_statement(creator: &Creator, notice: &PaymentNotice) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Payment statement {}", notice.period);
    let _ = writeln!(out, "Creator: {} (#{})", creator.name, creator.id);
    let _ = writeln!(out);

    let lines = [
        ("Gross sales".to_string(), notice.sales.gross_sales),
        ("Items sold".to_string(), notice.sales.item_count),
        (format!("Commission ({}%)", notice.terms.rate), -notice.commission_by_rate),
        (
            format!("Per-item fee ({} x {})", notice.terms.per_item_fee, notice.sales.item_count),
            -notice.commission_by_item,
        ),
        ("Withholding tax".to_string(), -notice.withholding_tax),
        ("Net payment".to_string(), notice.net_payment),
    ];
    for (label, amount) in lines {
        let _ = writeln!(out, "{:<28}{:>12}", label, amount);
    }

    let bank = &creator.bank;
    if let (Some(bank_name), Some(number)) = (&bank.bank_name, &bank.account_number) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Transfer to: {} {} {} {} {}",
            bank_name,
            bank.branch_name.as_deref().unwrap_or(""),
            bank.account_type.as_deref().unwrap_or(""),
            number,
            bank.account_holder.as_deref().unwrap_or("")
        );
    }
    out
}
