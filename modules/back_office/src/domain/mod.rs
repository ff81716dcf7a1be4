//! Domain layer - business logic and services

pub mod archive;
pub mod catalog;
pub mod commission;
pub mod contracts;
pub mod creators;
pub mod events;
pub mod payments;
pub mod repository;
pub mod settings;
pub mod validation;

pub use archive::{ArchiveError, ArchiveFolder, DisconnectedArchive, DocumentArchive};
pub use catalog::CatalogService;
pub use commission::{calculate, CommissionBreakdown, CommissionInput};
pub use contracts::{ContractService, IssuedContract};
pub use creators::CreatorService;
pub use events::{AuditEvent, AuditPublisher, NoOpAuditPublisher, TracingAuditPublisher};
pub use payments::PaymentService;
pub use repository::{
    CatalogRepository, ContractRepository, CreatorRepository, PaymentRepository,
    SalesRepository, SiteSettingsRepository,
};
pub use settings::SettingsService;

use std::sync::Arc;

/// All domain services, wired once and shared by the REST and native APIs
#[derive(Clone)]
pub struct Services {
    pub settings: Arc<SettingsService>,
    pub creators: Arc<CreatorService>,
    pub contracts: Arc<ContractService>,
    pub payments: Arc<PaymentService>,
    pub catalog: Arc<CatalogService>,
}

/// Repository and port implementations the services are built from
pub struct Dependencies {
    pub settings_repo: Arc<dyn SiteSettingsRepository>,
    pub creator_repo: Arc<dyn CreatorRepository>,
    pub contract_repo: Arc<dyn ContractRepository>,
    pub sales_repo: Arc<dyn SalesRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub catalog_repo: Arc<dyn CatalogRepository>,
    pub archive: Arc<dyn DocumentArchive>,
    pub audit: Arc<dyn AuditPublisher>,
}

impl Services {
    pub fn new(deps: Dependencies, config: &crate::config::Config) -> Self {
        let contracts = Arc::new(ContractService::new(
            deps.contract_repo,
            deps.creator_repo.clone(),
            deps.audit.clone(),
            config.agreement_base_url.clone(),
        ));

        Self {
            settings: Arc::new(SettingsService::new(
                deps.settings_repo,
                deps.audit.clone(),
                config.max_setting_value_size,
            )),
            creators: Arc::new(CreatorService::new(deps.creator_repo.clone())),
            payments: Arc::new(PaymentService::new(
                deps.payment_repo,
                deps.sales_repo,
                deps.creator_repo,
                contracts.clone(),
                deps.archive,
                deps.audit,
            )),
            contracts,
            catalog: Arc::new(CatalogService::new(deps.catalog_repo)),
        }
    }
}
