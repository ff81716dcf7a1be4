//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

// ===== Site Setting DTOs =====

/// Site setting response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteSettingDto {
    #[schema(example = "maintenance_mode")]
    pub key: String,

    #[schema(example = "off")]
    pub value: String,

    pub updated_at: DateTime<Utc>,
}

/// Site setting update request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSiteSettingRequest {
    pub value: String,
}

/// Site settings list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SiteSettingsListResponse {
    pub items: Vec<SiteSettingDto>,
    pub total: usize,
}

// ===== Creator DTOs =====

/// Payout bank account
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BankAccountDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_holder: Option<String>,
}

/// Creator response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatorDto {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Live commission rate (percent)
    #[schema(example = 15.0)]
    pub commission_rate: f64,

    /// Live per-item fee (yen)
    pub commission_per_item: i64,

    #[schema(example = "individual")]
    pub business_type: String,
    pub withholding_required: bool,
    pub bank: BankAccountDto,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creator create/update request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatorRequest {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub commission_rate: f64,

    #[serde(default)]
    pub commission_per_item: i64,

    /// `individual` or `corporate`
    #[serde(default = "default_business_type")]
    pub business_type: String,

    #[serde(default = "default_true")]
    pub withholding_required: bool,

    #[serde(default)]
    pub bank: BankAccountDto,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_business_type() -> String {
    "individual".to_string()
}

fn default_true() -> bool {
    true
}

/// Creators list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatorsListResponse {
    pub items: Vec<CreatorDto>,
    pub total: usize,
}

// ===== Contract DTOs =====

/// Commission terms
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct CommissionTermsDto {
    #[schema(example = 15.0)]
    pub commission_rate: f64,
    #[schema(example = 100)]
    pub commission_per_item: i64,
}

/// Contract response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContractDto {
    pub id: i64,
    pub creator_id: i64,
    pub version: i32,

    #[schema(example = "pending")]
    pub status: String,

    pub token: String,

    #[schema(example = "link")]
    pub delivery: String,

    pub previous_terms: CommissionTermsDto,
    pub new_terms: CommissionTermsDto,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_to: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_at: Option<DateTime<Utc>>,
}

/// What to do with the new terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContractAction {
    GenerateLink,
    SendContract,
}

/// Contract issue request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContractActionRequest {
    pub action: ContractAction,
    #[serde(flatten)]
    pub terms: CommissionTermsDto,
}

/// Freshly issued contract with its agreement link
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssuedContractDto {
    pub contract: ContractDto,
    pub agreement_url: String,
}

/// Contract history, shaped for the admin page's AJAX call
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContractHistoryResponse {
    pub success: bool,
    pub data: Vec<ContractDto>,
}

/// Contract shown to admins plus the terms payments use
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EffectiveContractResponse {
    pub contract: Option<ContractDto>,
    pub terms: CommissionTermsDto,
}

// ===== Sales DTOs =====

/// Period query (`YYYY-MM`)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PeriodQuery {
    #[schema(example = "2024-03")]
    pub period: String,
}

/// Per-creator line of a sales report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatorSalesDto {
    pub creator_id: i64,
    pub gross_sales: i64,
    pub item_count: i64,
}

/// Sales report for one month
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SalesReportResponse {
    pub period: String,
    pub items: Vec<CreatorSalesDto>,
    pub total_gross_sales: i64,
}

// ===== Payment DTOs =====

/// Creator + period query
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentQuery {
    pub creator_id: i64,
    #[schema(example = "2024-03")]
    pub period: String,
}

/// Payment notice issue request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IssueNoticeRequest {
    pub creator_id: i64,
    #[schema(example = "2024-03")]
    pub period: String,
}

/// Payment notice response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentNoticeDto {
    pub id: i64,
    pub creator_id: i64,
    pub period: String,
    pub gross_sales: i64,
    pub item_count: i64,
    pub terms: CommissionTermsDto,
    pub commission_by_rate: i64,
    pub commission_by_item: i64,
    pub total_commission: i64,
    pub withholding_tax: i64,
    pub net_payment: i64,

    #[schema(example = "issued")]
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_file_id: Option<String>,
}

/// Payment notices list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentNoticesListResponse {
    pub items: Vec<PaymentNoticeDto>,
    pub total: usize,
}

// ===== Catalog DTOs =====

/// Collection entry response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntryDto {
    pub id: i64,
    #[schema(example = "faq")]
    pub collection: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Collection entry create/update request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CatalogEntryRequest {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Collection entries list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogListResponse {
    pub items: Vec<CatalogEntryDto>,
    pub total: usize,
}

/// New order of a collection, first id first
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReorderRequest {
    pub ids: Vec<i64>,
}

/// `active_only` filter for list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveOnlyQuery {
    #[serde(default)]
    pub active_only: bool,
}
