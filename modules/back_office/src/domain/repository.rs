//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    CatalogDraft, CatalogEntry, Collection, CommissionTerms, Creator, CreatorContract,
    CreatorDraft, CreatorSales, PaymentNotice, Period, SalesSummary, SiteSetting,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository for the `site_settings` key/value table
#[async_trait]
pub trait SiteSettingsRepository: Send + Sync {
    /// Find a setting by key
    async fn find(&self, key: &str) -> Result<Option<SiteSetting>>;

    /// Create or replace a setting
    async fn upsert(&self, key: &str, value: &str) -> Result<SiteSetting>;

    /// Delete a setting; returns whether a row existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// List all settings ordered by key
    async fn list_all(&self) -> Result<Vec<SiteSetting>>;
}

/// Repository for creators
#[async_trait]
pub trait CreatorRepository: Send + Sync {
    async fn create(&self, draft: &CreatorDraft) -> Result<Creator>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Creator>>;

    /// List creators ordered by id
    async fn list(&self, active_only: bool) -> Result<Vec<Creator>>;

    /// Replace all editable fields; `None` when the creator does not exist
    async fn update(&self, id: i64, draft: &CreatorDraft) -> Result<Option<Creator>>;

    /// Replace only the live commission defaults
    async fn update_terms(&self, id: i64, terms: CommissionTerms) -> Result<()>;

    /// Delete a creator; returns whether a row existed
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// Repository for versioned creator contracts
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Insert a new contract row; the returned contract carries its id
    async fn insert(&self, contract: &CreatorContract) -> Result<CreatorContract>;

    /// Highest version recorded for a creator
    async fn max_version(&self, creator_id: i64) -> Result<Option<i32>>;

    async fn find_by_token(&self, token: &str) -> Result<Option<CreatorContract>>;

    /// Most recent agreed contract (highest id)
    async fn find_latest_agreed(&self, creator_id: i64) -> Result<Option<CreatorContract>>;

    /// Contract shown to admins: agreed rows first, then highest id
    async fn find_effective(&self, creator_id: i64) -> Result<Option<CreatorContract>>;

    /// All contracts of a creator, newest version first
    async fn list_for_creator(&self, creator_id: i64) -> Result<Vec<CreatorContract>>;

    /// Transition a pending contract to agreed
    async fn mark_agreed(&self, id: i64, agreed_at: DateTime<Utc>) -> Result<()>;
}

/// Read-only access to sales records
#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Completed transactions and paid order items of one creator in a period
    async fn creator_sales(&self, creator_id: i64, period: Period) -> Result<SalesSummary>;

    /// Per-creator totals for every creator with sales in a period
    async fn period_sales(&self, period: Period) -> Result<Vec<CreatorSales>>;
}

/// Repository for issued payment notices
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<PaymentNotice>>;

    async fn find_for_period(&self, creator_id: i64, period: Period)
        -> Result<Option<PaymentNotice>>;

    /// Insert a notice, or replace the one stored for the same creator and period
    async fn save(&self, notice: &PaymentNotice) -> Result<PaymentNotice>;

    async fn mark_paid(&self, id: i64, paid_at: DateTime<Utc>) -> Result<()>;

    async fn set_archive_file(&self, id: i64, file_id: &str) -> Result<()>;

    /// Notices of a period ordered by creator id
    async fn list_for_period(&self, period: Period) -> Result<Vec<PaymentNotice>>;
}

/// Repository for ordered content collections
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert at the given position
    async fn create(
        &self,
        collection: Collection,
        draft: &CatalogDraft,
        sort_order: i32,
    ) -> Result<CatalogEntry>;

    async fn find_by_id(&self, collection: Collection, id: i64) -> Result<Option<CatalogEntry>>;

    /// Entries ordered by sort_order, then id
    async fn list(&self, collection: Collection, active_only: bool) -> Result<Vec<CatalogEntry>>;

    /// Highest sort_order in the collection
    async fn max_sort_order(&self, collection: Collection) -> Result<Option<i32>>;

    async fn update(
        &self,
        collection: Collection,
        id: i64,
        draft: &CatalogDraft,
    ) -> Result<Option<CatalogEntry>>;

    async fn delete(&self, collection: Collection, id: i64) -> Result<bool>;

    /// Assign `sort_order = position` to each id in order
    async fn set_order(&self, collection: Collection, ids: &[i64]) -> Result<()>;
}
