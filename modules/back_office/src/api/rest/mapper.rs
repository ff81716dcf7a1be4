//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract::{
    BackOfficeError, BankAccount, CatalogDraft, CatalogEntry, CommissionTerms, Creator,
    CreatorContract, CreatorDraft, CreatorSales, PaymentNotice, SiteSetting,
};
use crate::domain::IssuedContract;

// ===== Site setting conversions =====

impl From<SiteSetting> for SiteSettingDto {
    fn from(setting: SiteSetting) -> Self {
        Self {
            key: setting.key,
            value: setting.value,
            updated_at: setting.updated_at,
        }
    }
}

// ===== Creator conversions =====

impl From<BankAccount> for BankAccountDto {
    fn from(bank: BankAccount) -> Self {
        Self {
            bank_name: bank.bank_name,
            branch_name: bank.branch_name,
            account_type: bank.account_type,
            account_number: bank.account_number,
            account_holder: bank.account_holder,
        }
    }
}

impl From<BankAccountDto> for BankAccount {
    fn from(dto: BankAccountDto) -> Self {
        Self {
            bank_name: dto.bank_name,
            branch_name: dto.branch_name,
            account_type: dto.account_type,
            account_number: dto.account_number,
            account_holder: dto.account_holder,
        }
    }
}

impl From<Creator> for CreatorDto {
    fn from(creator: Creator) -> Self {
        Self {
            id: creator.id,
            name: creator.name,
            email: creator.email,
            commission_rate: creator.terms.rate,
            commission_per_item: creator.terms.per_item_fee,
            business_type: creator.business_type.as_str().to_string(),
            withholding_required: creator.withholding_required,
            bank: creator.bank.into(),
            is_active: creator.is_active,
            created_at: creator.created_at,
            updated_at: creator.updated_at,
        }
    }
}

impl TryFrom<CreatorRequest> for CreatorDraft {
    type Error = BackOfficeError;

    fn try_from(req: CreatorRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name,
            email: req.email.filter(|e| !e.trim().is_empty()),
            terms: CommissionTerms {
                rate: req.commission_rate,
                per_item_fee: req.commission_per_item,
            },
            business_type: req
                .business_type
                .parse()
                .map_err(BackOfficeError::validation)?,
            withholding_required: req.withholding_required,
            bank: req.bank.into(),
            is_active: req.is_active,
        })
    }
}

// ===== Contract conversions =====

impl From<CommissionTerms> for CommissionTermsDto {
    fn from(terms: CommissionTerms) -> Self {
        Self {
            commission_rate: terms.rate,
            commission_per_item: terms.per_item_fee,
        }
    }
}

impl From<CommissionTermsDto> for CommissionTerms {
    fn from(dto: CommissionTermsDto) -> Self {
        Self {
            rate: dto.commission_rate,
            per_item_fee: dto.commission_per_item,
        }
    }
}

impl From<CreatorContract> for ContractDto {
    fn from(contract: CreatorContract) -> Self {
        Self {
            id: contract.id,
            creator_id: contract.creator_id,
            version: contract.version,
            status: contract.status.as_str().to_string(),
            token: contract.token,
            delivery: contract.delivery.as_str().to_string(),
            previous_terms: contract.previous_terms.into(),
            new_terms: contract.new_terms.into(),
            sent_to: contract.sent_to,
            created_at: contract.created_at,
            sent_at: contract.sent_at,
            agreed_at: contract.agreed_at,
        }
    }
}

impl From<IssuedContract> for IssuedContractDto {
    fn from(issued: IssuedContract) -> Self {
        Self {
            contract: issued.contract.into(),
            agreement_url: issued.agreement_url,
        }
    }
}

// ===== Sales and payment conversions =====

impl From<CreatorSales> for CreatorSalesDto {
    fn from(sales: CreatorSales) -> Self {
        Self {
            creator_id: sales.creator_id,
            gross_sales: sales.summary.gross_sales,
            item_count: sales.summary.item_count,
        }
    }
}

impl From<PaymentNotice> for PaymentNoticeDto {
    fn from(notice: PaymentNotice) -> Self {
        Self {
            id: notice.id,
            creator_id: notice.creator_id,
            period: notice.period.to_string(),
            gross_sales: notice.sales.gross_sales,
            item_count: notice.sales.item_count,
            terms: notice.terms.into(),
            commission_by_rate: notice.commission_by_rate,
            commission_by_item: notice.commission_by_item,
            total_commission: notice.total_commission,
            withholding_tax: notice.withholding_tax,
            net_payment: notice.net_payment,
            status: notice.status.as_str().to_string(),
            issued_at: notice.issued_at,
            paid_at: notice.paid_at,
            archive_file_id: notice.archive_file_id,
        }
    }
}

// ===== Catalog conversions =====

impl From<CatalogEntry> for CatalogEntryDto {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            collection: entry.collection.as_str().to_string(),
            title: entry.title,
            body: entry.body,
            tag: entry.tag,
            is_active: entry.is_active,
            sort_order: entry.sort_order,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

impl From<CatalogEntryRequest> for CatalogDraft {
    fn from(req: CatalogEntryRequest) -> Self {
        Self {
            title: req.title,
            body: req.body,
            tag: req.tag,
            is_active: req.is_active,
        }
    }
}
