//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. Status and
//! classification enums are stored as lowercase strings.

use super::entity::{
    catalog_entry, creator, creator_contract, payment_notice, site_setting,
};
use crate::contract::{
    BankAccount, CatalogEntry, CommissionTerms, Creator, CreatorContract, CreatorDraft,
    PaymentNotice, SalesSummary, SiteSetting,
};
use anyhow::anyhow;
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Site Setting Conversions =====

impl From<site_setting::Model> for SiteSetting {
    fn from(entity: site_setting::Model) -> Self {
        Self {
            key: entity.key,
            value: entity.value,
            updated_at: entity.updated_at,
        }
    }
}

// ===== Creator Conversions =====

impl TryFrom<creator::Model> for Creator {
    type Error = anyhow::Error;

    fn try_from(entity: creator::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            terms: CommissionTerms {
                rate: entity.commission_rate,
                per_item_fee: entity.commission_per_item,
            },
            business_type: entity.business_type.parse().map_err(|e: String| anyhow!(e))?,
            withholding_required: entity.withholding_required,
            bank: BankAccount {
                bank_name: entity.bank_name,
                branch_name: entity.branch_name,
                account_type: entity.account_type,
                account_number: entity.account_number,
                account_holder: entity.account_holder,
            },
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Active model carrying every editable creator field; id and timestamps unset
pub fn creator_active_model(draft: &CreatorDraft) -> creator::ActiveModel {
    creator::ActiveModel {
        id: NotSet,
        name: Set(draft.name.clone()),
        email: Set(draft.email.clone()),
        commission_rate: Set(draft.terms.rate),
        commission_per_item: Set(draft.terms.per_item_fee),
        business_type: Set(draft.business_type.as_str().to_string()),
        withholding_required: Set(draft.withholding_required),
        bank_name: Set(draft.bank.bank_name.clone()),
        branch_name: Set(draft.bank.branch_name.clone()),
        account_type: Set(draft.bank.account_type.clone()),
        account_number: Set(draft.bank.account_number.clone()),
        account_holder: Set(draft.bank.account_holder.clone()),
        is_active: Set(draft.is_active),
        created_at: NotSet,
        updated_at: NotSet,
    }
}

// ===== Contract Conversions =====

impl TryFrom<creator_contract::Model> for CreatorContract {
    type Error = anyhow::Error;

    fn try_from(entity: creator_contract::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            creator_id: entity.creator_id,
            version: entity.version,
            status: entity.status.parse().map_err(|e: String| anyhow!(e))?,
            token: entity.token,
            delivery: entity.delivery.parse().map_err(|e: String| anyhow!(e))?,
            previous_terms: CommissionTerms {
                rate: entity.previous_rate,
                per_item_fee: entity.previous_per_item_fee,
            },
            new_terms: CommissionTerms {
                rate: entity.new_rate,
                per_item_fee: entity.new_per_item_fee,
            },
            sent_to: entity.sent_to,
            created_at: entity.created_at,
            sent_at: entity.sent_at,
            agreed_at: entity.agreed_at,
        })
    }
}

impl From<&CreatorContract> for creator_contract::ActiveModel {
    fn from(model: &CreatorContract) -> Self {
        Self {
            id: if model.id == 0 { NotSet } else { Set(model.id) },
            creator_id: Set(model.creator_id),
            version: Set(model.version),
            status: Set(model.status.as_str().to_string()),
            token: Set(model.token.clone()),
            delivery: Set(model.delivery.as_str().to_string()),
            previous_rate: Set(model.previous_terms.rate),
            previous_per_item_fee: Set(model.previous_terms.per_item_fee),
            new_rate: Set(model.new_terms.rate),
            new_per_item_fee: Set(model.new_terms.per_item_fee),
            sent_to: Set(model.sent_to.clone()),
            created_at: Set(model.created_at),
            sent_at: Set(model.sent_at),
            agreed_at: Set(model.agreed_at),
        }
    }
}

// ===== Payment Notice Conversions =====

impl TryFrom<payment_notice::Model> for PaymentNotice {
    type Error = anyhow::Error;

    fn try_from(entity: payment_notice::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            creator_id: entity.creator_id,
            period: entity.period.parse().map_err(|e: String| anyhow!(e))?,
            sales: SalesSummary {
                gross_sales: entity.gross_sales,
                item_count: entity.item_count,
            },
            terms: CommissionTerms {
                rate: entity.commission_rate,
                per_item_fee: entity.commission_per_item,
            },
            commission_by_rate: entity.commission_by_rate,
            commission_by_item: entity.commission_by_item,
            total_commission: entity.total_commission,
            withholding_tax: entity.withholding_tax,
            net_payment: entity.net_payment,
            status: entity.status.parse().map_err(|e: String| anyhow!(e))?,
            issued_at: entity.issued_at,
            paid_at: entity.paid_at,
            archive_file_id: entity.archive_file_id,
        })
    }
}

impl From<&PaymentNotice> for payment_notice::ActiveModel {
    fn from(model: &PaymentNotice) -> Self {
        Self {
            id: if model.id == 0 { NotSet } else { Set(model.id) },
            creator_id: Set(model.creator_id),
            period: Set(model.period.to_string()),
            gross_sales: Set(model.sales.gross_sales),
            item_count: Set(model.sales.item_count),
            commission_rate: Set(model.terms.rate),
            commission_per_item: Set(model.terms.per_item_fee),
            commission_by_rate: Set(model.commission_by_rate),
            commission_by_item: Set(model.commission_by_item),
            total_commission: Set(model.total_commission),
            withholding_tax: Set(model.withholding_tax),
            net_payment: Set(model.net_payment),
            status: Set(model.status.as_str().to_string()),
            issued_at: Set(model.issued_at),
            paid_at: Set(model.paid_at),
            archive_file_id: Set(model.archive_file_id.clone()),
        }
    }
}

// ===== Catalog Conversions =====

impl TryFrom<catalog_entry::Model> for CatalogEntry {
    type Error = anyhow::Error;

    fn try_from(entity: catalog_entry::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            collection: entity.collection.parse().map_err(|e: String| anyhow!(e))?,
            title: entity.title,
            body: entity.body,
            tag: entity.tag,
            is_active: entity.is_active,
            sort_order: entity.sort_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one
pub fn convert_all<E, M>(rows: Vec<E>) -> anyhow::Result<Vec<M>>
where
    M: TryFrom<E, Error = anyhow::Error>,
{
    rows.into_iter().map(M::try_from).collect()
}
