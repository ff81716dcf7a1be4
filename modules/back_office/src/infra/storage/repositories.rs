//! SeaORM repository implementations

use crate::contract::{
    CatalogDraft, CatalogEntry, Collection, CommissionTerms, Creator, CreatorContract,
    CreatorDraft, CreatorSales, PaymentNotice, Period, SalesSummary, SiteSetting,
};
use crate::domain::repository::{
    CatalogRepository, ContractRepository, CreatorRepository, PaymentRepository,
    SalesRepository, SiteSettingsRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    prelude::Expr, sea_query::OnConflict, ActiveModelTrait, ActiveValue::Set, ColumnTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    TransactionTrait,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::entity::{
    catalog_entry, creator, creator_contract, order, order_item, payment_notice,
    service_transaction, site_setting,
};
use super::mapper::{convert_all, creator_active_model};

// ===== Site Settings Repository =====

pub struct SeaOrmSiteSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSiteSettingsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SiteSettingsRepository for SeaOrmSiteSettingsRepository {
    async fn find(&self, key: &str) -> Result<Option<SiteSetting>> {
        let result = site_setting::Entity::find_by_id(key.to_string())
            .one(&*self.db)
            .await?;

        Ok(result.map(Into::into))
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<SiteSetting> {
        let now = Utc::now();
        let active = site_setting::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            updated_at: Set(now),
        };

        site_setting::Entity::insert(active)
            .on_conflict(
                OnConflict::column(site_setting::Column::Key)
                    .update_columns([site_setting::Column::Value, site_setting::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&*self.db)
            .await?;

        Ok(SiteSetting {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: now,
        })
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let result = site_setting::Entity::delete_by_id(key.to_string())
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn list_all(&self) -> Result<Vec<SiteSetting>> {
        let results = site_setting::Entity::find()
            .order_by_asc(site_setting::Column::Key)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Into::into).collect())
    }
}

// ===== Creator Repository =====

pub struct SeaOrmCreatorRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCreatorRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CreatorRepository for SeaOrmCreatorRepository {
    async fn create(&self, draft: &CreatorDraft) -> Result<Creator> {
        let now = Utc::now();
        let mut active = creator_active_model(draft);
        active.created_at = Set(now);
        active.updated_at = Set(now);

        let model = active.insert(&*self.db).await?;
        model.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Creator>> {
        creator::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Creator>> {
        let mut query = creator::Entity::find();
        if active_only {
            query = query.filter(creator::Column::IsActive.eq(true));
        }

        let results = query
            .order_by_asc(creator::Column::Id)
            .all(&*self.db)
            .await?;

        convert_all(results)
    }

    async fn update(&self, id: i64, draft: &CreatorDraft) -> Result<Option<Creator>> {
        if creator::Entity::find_by_id(id).one(&*self.db).await?.is_none() {
            return Ok(None);
        }

        let mut active = creator_active_model(draft);
        active.id = Set(id);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        Ok(Some(model.try_into()?))
    }

    async fn update_terms(&self, id: i64, terms: CommissionTerms) -> Result<()> {
        creator::Entity::update_many()
            .col_expr(creator::Column::CommissionRate, Expr::value(terms.rate))
            .col_expr(
                creator::Column::CommissionPerItem,
                Expr::value(terms.per_item_fee),
            )
            .col_expr(creator::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(creator::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = creator::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

// ===== Contract Repository =====

pub struct SeaOrmContractRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmContractRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn for_creator(creator_id: i64) -> Select<creator_contract::Entity> {
        creator_contract::Entity::find()
            .filter(creator_contract::Column::CreatorId.eq(creator_id))
    }
}

#[async_trait]
impl ContractRepository for SeaOrmContractRepository {
    async fn insert(&self, contract: &CreatorContract) -> Result<CreatorContract> {
        let active: creator_contract::ActiveModel = contract.into();
        let model = active.insert(&*self.db).await?;
        model.try_into()
    }

    async fn max_version(&self, creator_id: i64) -> Result<Option<i32>> {
        let latest = Self::for_creator(creator_id)
            .order_by_desc(creator_contract::Column::Version)
            .one(&*self.db)
            .await?;

        Ok(latest.map(|c| c.version))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<CreatorContract>> {
        creator_contract::Entity::find()
            .filter(creator_contract::Column::Token.eq(token))
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn find_latest_agreed(&self, creator_id: i64) -> Result<Option<CreatorContract>> {
        Self::for_creator(creator_id)
            .filter(creator_contract::Column::Status.eq("agreed"))
            .order_by_desc(creator_contract::Column::Id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn find_effective(&self, creator_id: i64) -> Result<Option<CreatorContract>> {
        Self::for_creator(creator_id)
            .order_by_desc(creator_contract::Column::Status.eq("agreed"))
            .order_by_desc(creator_contract::Column::Id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list_for_creator(&self, creator_id: i64) -> Result<Vec<CreatorContract>> {
        let results = Self::for_creator(creator_id)
            .order_by_desc(creator_contract::Column::Version)
            .all(&*self.db)
            .await?;

        convert_all(results)
    }

    async fn mark_agreed(&self, id: i64, agreed_at: DateTime<Utc>) -> Result<()> {
        creator_contract::Entity::update_many()
            .col_expr(creator_contract::Column::Status, Expr::value("agreed"))
            .col_expr(creator_contract::Column::AgreedAt, Expr::value(agreed_at))
            .filter(creator_contract::Column::Id.eq(id))
            .filter(creator_contract::Column::Status.eq("pending"))
            .exec(&*self.db)
            .await?;

        Ok(())
    }
}

// ===== Sales Repository =====

/// Reads the storefront's transaction and order tables.
///
/// Amounts are folded in Rust so the result type does not depend on how the
/// backend types `SUM` over big integers.
pub struct SeaOrmSalesRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSalesRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn completed_transactions(period: Period) -> Select<service_transaction::Entity> {
        let (start, end) = period.bounds();
        service_transaction::Entity::find()
            .filter(service_transaction::Column::Status.eq("completed"))
            .filter(service_transaction::Column::CompletedAt.gte(start))
            .filter(service_transaction::Column::CompletedAt.lt(end))
    }

    fn paid_order_items(period: Period) -> Select<order_item::Entity> {
        let (start, end) = period.bounds();
        order_item::Entity::find()
            .inner_join(order::Entity)
            .filter(order::Column::Status.eq("paid"))
            .filter(order::Column::PaidAt.gte(start))
            .filter(order::Column::PaidAt.lt(end))
    }
}

fn add_transaction(summary: &mut SalesSummary, tx: &service_transaction::Model) {
    summary.gross_sales += tx.amount;
    summary.item_count += 1;
}

fn add_order_item(summary: &mut SalesSummary, item: &order_item::Model) {
    summary.gross_sales += item.unit_price * item.quantity;
    summary.item_count += item.quantity;
}

#[async_trait]
impl SalesRepository for SeaOrmSalesRepository {
    async fn creator_sales(&self, creator_id: i64, period: Period) -> Result<SalesSummary> {
        let transactions = Self::completed_transactions(period)
            .filter(service_transaction::Column::CreatorId.eq(creator_id))
            .all(&*self.db)
            .await?;
        let items = Self::paid_order_items(period)
            .filter(order_item::Column::CreatorId.eq(creator_id))
            .all(&*self.db)
            .await?;

        let mut summary = SalesSummary::default();
        transactions
            .iter()
            .for_each(|tx| add_transaction(&mut summary, tx));
        items
            .iter()
            .for_each(|item| add_order_item(&mut summary, item));

        Ok(summary)
    }

    async fn period_sales(&self, period: Period) -> Result<Vec<CreatorSales>> {
        let transactions = Self::completed_transactions(period)
            .all(&*self.db)
            .await?;
        let items = Self::paid_order_items(period).all(&*self.db).await?;

        let mut by_creator: BTreeMap<i64, SalesSummary> = BTreeMap::new();
        for tx in &transactions {
            add_transaction(by_creator.entry(tx.creator_id).or_default(), tx);
        }
        for item in &items {
            add_order_item(by_creator.entry(item.creator_id).or_default(), item);
        }

        Ok(by_creator
            .into_iter()
            .map(|(creator_id, summary)| CreatorSales {
                creator_id,
                summary,
            })
            .collect())
    }
}

// ===== Payment Repository =====

pub struct SeaOrmPaymentRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<PaymentNotice>> {
        payment_notice::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn find_for_period(
        &self,
        creator_id: i64,
        period: Period,
    ) -> Result<Option<PaymentNotice>> {
        payment_notice::Entity::find()
            .filter(payment_notice::Column::CreatorId.eq(creator_id))
            .filter(payment_notice::Column::Period.eq(period.to_string()))
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn save(&self, notice: &PaymentNotice) -> Result<PaymentNotice> {
        let existing = payment_notice::Entity::find()
            .filter(payment_notice::Column::CreatorId.eq(notice.creator_id))
            .filter(payment_notice::Column::Period.eq(notice.period.to_string()))
            .one(&*self.db)
            .await?;

        let mut active: payment_notice::ActiveModel = notice.into();
        let model = match existing {
            Some(row) => {
                active.id = Set(row.id);
                active.update(&*self.db).await?
            }
            None => active.insert(&*self.db).await?,
        };

        model.try_into()
    }

    async fn mark_paid(&self, id: i64, paid_at: DateTime<Utc>) -> Result<()> {
        payment_notice::Entity::update_many()
            .col_expr(payment_notice::Column::Status, Expr::value("paid"))
            .col_expr(payment_notice::Column::PaidAt, Expr::value(paid_at))
            .filter(payment_notice::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn set_archive_file(&self, id: i64, file_id: &str) -> Result<()> {
        payment_notice::Entity::update_many()
            .col_expr(payment_notice::Column::ArchiveFileId, Expr::value(file_id))
            .filter(payment_notice::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;

        Ok(())
    }

    async fn list_for_period(&self, period: Period) -> Result<Vec<PaymentNotice>> {
        let results = payment_notice::Entity::find()
            .filter(payment_notice::Column::Period.eq(period.to_string()))
            .order_by_asc(payment_notice::Column::CreatorId)
            .all(&*self.db)
            .await?;

        convert_all(results)
    }
}

// ===== Catalog Repository =====

pub struct SeaOrmCatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn in_collection(collection: Collection) -> Select<catalog_entry::Entity> {
        catalog_entry::Entity::find()
            .filter(catalog_entry::Column::Collection.eq(collection.as_str()))
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn create(
        &self,
        collection: Collection,
        draft: &CatalogDraft,
        sort_order: i32,
    ) -> Result<CatalogEntry> {
        let now = Utc::now();
        let active = catalog_entry::ActiveModel {
            collection: Set(collection.as_str().to_string()),
            title: Set(draft.title.clone()),
            body: Set(draft.body.clone()),
            tag: Set(draft.tag.clone()),
            is_active: Set(draft.is_active),
            sort_order: Set(sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&*self.db).await?;
        model.try_into()
    }

    async fn find_by_id(&self, collection: Collection, id: i64) -> Result<Option<CatalogEntry>> {
        Self::in_collection(collection)
            .filter(catalog_entry::Column::Id.eq(id))
            .one(&*self.db)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list(&self, collection: Collection, active_only: bool) -> Result<Vec<CatalogEntry>> {
        let mut query = Self::in_collection(collection);
        if active_only {
            query = query.filter(catalog_entry::Column::IsActive.eq(true));
        }

        let results = query
            .order_by_asc(catalog_entry::Column::SortOrder)
            .order_by_asc(catalog_entry::Column::Id)
            .all(&*self.db)
            .await?;

        convert_all(results)
    }

    async fn max_sort_order(&self, collection: Collection) -> Result<Option<i32>> {
        let last = Self::in_collection(collection)
            .order_by_desc(catalog_entry::Column::SortOrder)
            .limit(1)
            .one(&*self.db)
            .await?;

        Ok(last.map(|e| e.sort_order))
    }

    async fn update(
        &self,
        collection: Collection,
        id: i64,
        draft: &CatalogDraft,
    ) -> Result<Option<CatalogEntry>> {
        if self.find_by_id(collection, id).await?.is_none() {
            return Ok(None);
        }

        let active = catalog_entry::ActiveModel {
            id: Set(id),
            title: Set(draft.title.clone()),
            body: Set(draft.body.clone()),
            tag: Set(draft.tag.clone()),
            is_active: Set(draft.is_active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active.update(&*self.db).await?;
        Ok(Some(model.try_into()?))
    }

    async fn delete(&self, collection: Collection, id: i64) -> Result<bool> {
        let result = catalog_entry::Entity::delete_many()
            .filter(catalog_entry::Column::Collection.eq(collection.as_str()))
            .filter(catalog_entry::Column::Id.eq(id))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn set_order(&self, collection: Collection, ids: &[i64]) -> Result<()> {
        let txn = self.db.begin().await?;

        for (position, id) in ids.iter().enumerate() {
            catalog_entry::Entity::update_many()
                .col_expr(
                    catalog_entry::Column::SortOrder,
                    Expr::value(i32::try_from(position)?),
                )
                .filter(catalog_entry::Column::Collection.eq(collection.as_str()))
                .filter(catalog_entry::Column::Id.eq(*id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }
}
