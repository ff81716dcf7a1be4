//! Common test utilities: in-memory repositories and a wired service set

#![allow(dead_code)]

use async_trait::async_trait;
use back_office::config::Config;
use back_office::contract::*;
use back_office::domain::contracts::select_effective;
use back_office::domain::repository::*;
use back_office::domain::{
    AuditEvent, AuditPublisher, Dependencies, DisconnectedArchive, DocumentArchive, Services,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

pub fn period(raw: &str) -> Period {
    raw.parse().unwrap()
}

pub fn terms(rate: f64, per_item_fee: i64) -> CommissionTerms {
    CommissionTerms { rate, per_item_fee }
}

pub fn creator_draft(name: &str, email: Option<&str>) -> CreatorDraft {
    CreatorDraft {
        name: name.to_string(),
        email: email.map(str::to_string),
        terms: terms(20.0, 0),
        business_type: BusinessType::Individual,
        withholding_required: true,
        bank: BankAccount::default(),
        is_active: true,
    }
}

pub fn catalog_draft(title: &str) -> CatalogDraft {
    CatalogDraft {
        title: title.to_string(),
        body: None,
        tag: None,
        is_active: true,
    }
}

// ===== Mock repositories =====

#[derive(Clone, Default)]
pub struct MockSiteSettingsRepo {
    data: Arc<RwLock<BTreeMap<String, SiteSetting>>>,
}

#[async_trait]
impl SiteSettingsRepository for MockSiteSettingsRepo {
    async fn find(&self, key: &str) -> anyhow::Result<Option<SiteSetting>> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn upsert(&self, key: &str, value: &str) -> anyhow::Result<SiteSetting> {
        let setting = SiteSetting {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: Utc::now(),
        };
        self.data.write().insert(key.to_string(), setting.clone());
        Ok(setting)
    }

    async fn delete(&self, key: &str) -> anyhow::Result<bool> {
        Ok(self.data.write().remove(key).is_some())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<SiteSetting>> {
        Ok(self.data.read().values().cloned().collect())
    }
}

#[derive(Clone, Default)]
pub struct MockCreatorRepo {
    data: Arc<RwLock<BTreeMap<i64, Creator>>>,
}

impl MockCreatorRepo {
    pub fn get(&self, id: i64) -> Option<Creator> {
        self.data.read().get(&id).cloned()
    }
}

fn creator_from_draft(id: i64, draft: &CreatorDraft, created_at: DateTime<Utc>) -> Creator {
    Creator {
        id,
        name: draft.name.clone(),
        email: draft.email.clone(),
        terms: draft.terms,
        business_type: draft.business_type,
        withholding_required: draft.withholding_required,
        bank: draft.bank.clone(),
        is_active: draft.is_active,
        created_at,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl CreatorRepository for MockCreatorRepo {
    async fn create(&self, draft: &CreatorDraft) -> anyhow::Result<Creator> {
        let mut data = self.data.write();
        let id = data.keys().next_back().copied().unwrap_or(0) + 1;
        let creator = creator_from_draft(id, draft, Utc::now());
        data.insert(id, creator.clone());
        Ok(creator)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Creator>> {
        Ok(self.get(id))
    }

    async fn list(&self, active_only: bool) -> anyhow::Result<Vec<Creator>> {
        Ok(self
            .data
            .read()
            .values()
            .filter(|c| !active_only || c.is_active)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, draft: &CreatorDraft) -> anyhow::Result<Option<Creator>> {
        let mut data = self.data.write();
        let Some(existing) = data.get(&id) else {
            return Ok(None);
        };
        let updated = creator_from_draft(id, draft, existing.created_at);
        data.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn update_terms(&self, id: i64, terms: CommissionTerms) -> anyhow::Result<()> {
        if let Some(creator) = self.data.write().get_mut(&id) {
            creator.terms = terms;
            creator.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.data.write().remove(&id).is_some())
    }
}

#[derive(Clone, Default)]
pub struct MockContractRepo {
    data: Arc<RwLock<Vec<CreatorContract>>>,
}

impl MockContractRepo {
    pub fn all(&self) -> Vec<CreatorContract> {
        self.data.read().clone()
    }

    fn for_creator(&self, creator_id: i64) -> Vec<CreatorContract> {
        self.data
            .read()
            .iter()
            .filter(|c| c.creator_id == creator_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ContractRepository for MockContractRepo {
    async fn insert(&self, contract: &CreatorContract) -> anyhow::Result<CreatorContract> {
        let mut data = self.data.write();
        if data
            .iter()
            .any(|c| c.creator_id == contract.creator_id && c.version == contract.version)
        {
            anyhow::bail!("duplicate contract version");
        }
        let mut stored = contract.clone();
        stored.id = data.len() as i64 + 1;
        data.push(stored.clone());
        Ok(stored)
    }

    async fn max_version(&self, creator_id: i64) -> anyhow::Result<Option<i32>> {
        Ok(self
            .for_creator(creator_id)
            .iter()
            .map(|c| c.version)
            .max())
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<CreatorContract>> {
        Ok(self.data.read().iter().find(|c| c.token == token).cloned())
    }

    async fn find_latest_agreed(&self, creator_id: i64) -> anyhow::Result<Option<CreatorContract>> {
        Ok(self
            .for_creator(creator_id)
            .into_iter()
            .filter(|c| c.status == ContractStatus::Agreed)
            .max_by_key(|c| c.id))
    }

    async fn find_effective(&self, creator_id: i64) -> anyhow::Result<Option<CreatorContract>> {
        Ok(select_effective(&self.for_creator(creator_id)).cloned())
    }

    async fn list_for_creator(&self, creator_id: i64) -> anyhow::Result<Vec<CreatorContract>> {
        let mut contracts = self.for_creator(creator_id);
        contracts.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(contracts)
    }

    async fn mark_agreed(&self, id: i64, agreed_at: DateTime<Utc>) -> anyhow::Result<()> {
        if let Some(contract) = self.data.write().iter_mut().find(|c| c.id == id) {
            contract.status = ContractStatus::Agreed;
            contract.agreed_at = Some(agreed_at);
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockSalesRepo {
    data: Arc<RwLock<HashMap<(i64, Period), SalesSummary>>>,
}

impl MockSalesRepo {
    pub fn set(&self, creator_id: i64, period: Period, gross_sales: i64, item_count: i64) {
        self.data.write().insert(
            (creator_id, period),
            SalesSummary {
                gross_sales,
                item_count,
            },
        );
    }
}

#[async_trait]
impl SalesRepository for MockSalesRepo {
    async fn creator_sales(&self, creator_id: i64, period: Period) -> anyhow::Result<SalesSummary> {
        Ok(self
            .data
            .read()
            .get(&(creator_id, period))
            .copied()
            .unwrap_or_default())
    }

    async fn period_sales(&self, period: Period) -> anyhow::Result<Vec<CreatorSales>> {
        let mut rows: Vec<CreatorSales> = self
            .data
            .read()
            .iter()
            .filter(|((_, p), _)| *p == period)
            .map(|((creator_id, _), summary)| CreatorSales {
                creator_id: *creator_id,
                summary: *summary,
            })
            .collect();
        rows.sort_by_key(|r| r.creator_id);
        Ok(rows)
    }
}

#[derive(Clone, Default)]
pub struct MockPaymentRepo {
    data: Arc<RwLock<BTreeMap<i64, PaymentNotice>>>,
}

impl MockPaymentRepo {
    pub fn count(&self) -> usize {
        self.data.read().len()
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepo {
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<PaymentNotice>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_for_period(
        &self,
        creator_id: i64,
        period: Period,
    ) -> anyhow::Result<Option<PaymentNotice>> {
        Ok(self
            .data
            .read()
            .values()
            .find(|n| n.creator_id == creator_id && n.period == period)
            .cloned())
    }

    async fn save(&self, notice: &PaymentNotice) -> anyhow::Result<PaymentNotice> {
        let mut data = self.data.write();
        let existing = data
            .values()
            .find(|n| n.creator_id == notice.creator_id && n.period == notice.period)
            .map(|n| n.id);
        let id = existing.unwrap_or_else(|| data.keys().next_back().copied().unwrap_or(0) + 1);

        let mut stored = notice.clone();
        stored.id = id;
        data.insert(id, stored.clone());
        Ok(stored)
    }

    async fn mark_paid(&self, id: i64, paid_at: DateTime<Utc>) -> anyhow::Result<()> {
        if let Some(notice) = self.data.write().get_mut(&id) {
            notice.status = PaymentStatus::Paid;
            notice.paid_at = Some(paid_at);
        }
        Ok(())
    }

    async fn set_archive_file(&self, id: i64, file_id: &str) -> anyhow::Result<()> {
        if let Some(notice) = self.data.write().get_mut(&id) {
            notice.archive_file_id = Some(file_id.to_string());
        }
        Ok(())
    }

    async fn list_for_period(&self, period: Period) -> anyhow::Result<Vec<PaymentNotice>> {
        let mut notices: Vec<PaymentNotice> = self
            .data
            .read()
            .values()
            .filter(|n| n.period == period)
            .cloned()
            .collect();
        notices.sort_by_key(|n| n.creator_id);
        Ok(notices)
    }
}

#[derive(Clone, Default)]
pub struct MockCatalogRepo {
    data: Arc<RwLock<BTreeMap<i64, CatalogEntry>>>,
}

impl MockCatalogRepo {
    fn sorted(&self, collection: Collection) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .data
            .read()
            .values()
            .filter(|e| e.collection == collection)
            .cloned()
            .collect();
        entries.sort_by_key(|e| (e.sort_order, e.id));
        entries
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepo {
    async fn create(
        &self,
        collection: Collection,
        draft: &CatalogDraft,
        sort_order: i32,
    ) -> anyhow::Result<CatalogEntry> {
        let mut data = self.data.write();
        let id = data.keys().next_back().copied().unwrap_or(0) + 1;
        let now = Utc::now();
        let entry = CatalogEntry {
            id,
            collection,
            title: draft.title.clone(),
            body: draft.body.clone(),
            tag: draft.tag.clone(),
            is_active: draft.is_active,
            sort_order,
            created_at: now,
            updated_at: now,
        };
        data.insert(id, entry.clone());
        Ok(entry)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: i64,
    ) -> anyhow::Result<Option<CatalogEntry>> {
        Ok(self
            .data
            .read()
            .get(&id)
            .filter(|e| e.collection == collection)
            .cloned())
    }

    async fn list(
        &self,
        collection: Collection,
        active_only: bool,
    ) -> anyhow::Result<Vec<CatalogEntry>> {
        Ok(self
            .sorted(collection)
            .into_iter()
            .filter(|e| !active_only || e.is_active)
            .collect())
    }

    async fn max_sort_order(&self, collection: Collection) -> anyhow::Result<Option<i32>> {
        Ok(self.sorted(collection).iter().map(|e| e.sort_order).max())
    }

    async fn update(
        &self,
        collection: Collection,
        id: i64,
        draft: &CatalogDraft,
    ) -> anyhow::Result<Option<CatalogEntry>> {
        let mut data = self.data.write();
        let Some(entry) = data.get_mut(&id).filter(|e| e.collection == collection) else {
            return Ok(None);
        };
        entry.title = draft.title.clone();
        entry.body = draft.body.clone();
        entry.tag = draft.tag.clone();
        entry.is_active = draft.is_active;
        entry.updated_at = Utc::now();
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, collection: Collection, id: i64) -> anyhow::Result<bool> {
        let mut data = self.data.write();
        if data.get(&id).is_some_and(|e| e.collection == collection) {
            data.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn set_order(&self, collection: Collection, ids: &[i64]) -> anyhow::Result<()> {
        let mut data = self.data.write();
        for (position, id) in ids.iter().enumerate() {
            if let Some(entry) = data.get_mut(id).filter(|e| e.collection == collection) {
                entry.sort_order = position as i32;
            }
        }
        Ok(())
    }
}

// ===== Audit publishers =====

#[derive(Clone, Default)]
pub struct RecordingAuditPublisher {
    events: Arc<RwLock<Vec<AuditEvent>>>,
}

impl RecordingAuditPublisher {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl AuditPublisher for RecordingAuditPublisher {
    async fn publish(&self, event: AuditEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

pub struct FailingAuditPublisher;

#[async_trait]
impl AuditPublisher for FailingAuditPublisher {
    async fn publish(&self, _event: AuditEvent) -> anyhow::Result<()> {
        anyhow::bail!("audit sink unavailable")
    }
}

// ===== Wired environment =====

/// Services over in-memory repositories, with handles to inspect state
pub struct TestEnv {
    pub services: Services,
    pub settings: MockSiteSettingsRepo,
    pub creators: MockCreatorRepo,
    pub contracts: MockContractRepo,
    pub sales: MockSalesRepo,
    pub payments: MockPaymentRepo,
    pub catalog: MockCatalogRepo,
    pub audit: RecordingAuditPublisher,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_archive(Arc::new(DisconnectedArchive))
    }

    pub fn with_archive(archive: Arc<dyn DocumentArchive>) -> Self {
        let audit = RecordingAuditPublisher::default();
        Self::build(archive, Arc::new(audit.clone()), audit)
    }

    pub fn with_audit_publisher(publisher: Arc<dyn AuditPublisher>) -> Self {
        Self::build(
            Arc::new(DisconnectedArchive),
            publisher,
            RecordingAuditPublisher::default(),
        )
    }

    fn build(
        archive: Arc<dyn DocumentArchive>,
        publisher: Arc<dyn AuditPublisher>,
        audit: RecordingAuditPublisher,
    ) -> Self {
        let settings = MockSiteSettingsRepo::default();
        let creators = MockCreatorRepo::default();
        let contracts = MockContractRepo::default();
        let sales = MockSalesRepo::default();
        let payments = MockPaymentRepo::default();
        let catalog = MockCatalogRepo::default();

        let config = Config {
            agreement_base_url: "https://shop.example/contract/agree".to_string(),
            max_setting_value_size: 1024,
            ..Config::default()
        };

        let services = Services::new(
            Dependencies {
                settings_repo: Arc::new(settings.clone()),
                creator_repo: Arc::new(creators.clone()),
                contract_repo: Arc::new(contracts.clone()),
                sales_repo: Arc::new(sales.clone()),
                payment_repo: Arc::new(payments.clone()),
                catalog_repo: Arc::new(catalog.clone()),
                archive,
                audit: publisher,
            },
            &config,
        );

        Self {
            services,
            settings,
            creators,
            contracts,
            sales,
            payments,
            catalog,
            audit,
        }
    }

    /// Create a creator through the service
    pub async fn creator(&self, name: &str, email: Option<&str>) -> Creator {
        self.services
            .creators
            .create(creator_draft(name, email))
            .await
            .unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
