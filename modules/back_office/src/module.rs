//! Module assembly: repositories, ports and services wired over one database

use crate::config::Config;
use crate::contract::BackOfficeApi;
use crate::domain::{
    AuditPublisher, Dependencies, DisconnectedArchive, DocumentArchive, NoOpAuditPublisher,
    Services, TracingAuditPublisher,
};
use crate::infra::archive::LocalDirArchive;
use crate::infra::storage::repositories::{
    SeaOrmCatalogRepository, SeaOrmContractRepository, SeaOrmCreatorRepository,
    SeaOrmPaymentRepository, SeaOrmSalesRepository, SeaOrmSiteSettingsRepository,
};
use anyhow::Result;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Back office module
pub struct BackOfficeModule {
    services: Services,
}

impl BackOfficeModule {
    /// Build every repository and service on top of `db`
    pub fn new(db: Arc<DatabaseConnection>, config: Config) -> Self {
        let archive: Arc<dyn DocumentArchive> = match &config.archive_dir {
            Some(dir) => {
                tracing::info!(dir = %dir.display(), "statement archive enabled");
                Arc::new(LocalDirArchive::new(dir.clone()))
            }
            None => Arc::new(DisconnectedArchive),
        };

        let audit: Arc<dyn AuditPublisher> = if config.audit_log {
            Arc::new(TracingAuditPublisher)
        } else {
            Arc::new(NoOpAuditPublisher)
        };

        let deps = Dependencies {
            settings_repo: Arc::new(SeaOrmSiteSettingsRepository::new(db.clone())),
            creator_repo: Arc::new(SeaOrmCreatorRepository::new(db.clone())),
            contract_repo: Arc::new(SeaOrmContractRepository::new(db.clone())),
            sales_repo: Arc::new(SeaOrmSalesRepository::new(db.clone())),
            payment_repo: Arc::new(SeaOrmPaymentRepository::new(db.clone())),
            catalog_repo: Arc::new(SeaOrmCatalogRepository::new(db)),
            archive,
            audit,
        };

        let services = Services::new(deps, &config);
        tracing::info!("Back office module initialized");

        Self { services }
    }

    /// Apply all pending schema migrations
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        use crate::infra::storage::migrations::Migrator;
        use sea_orm_migration::MigratorTrait;

        Migrator::up(db, None).await?;
        tracing::info!("Back office migrations completed");
        Ok(())
    }

    /// REST routes mounted on `router`
    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        tracing::info!("Registering back office REST routes");
        crate::api::rest::routes::register_routes(router, self.services.clone())
    }

    /// In-process client for other modules
    pub fn native_client(&self) -> Arc<dyn BackOfficeApi> {
        Arc::new(crate::api::native::NativeClient::new(self.services.clone()))
    }
}
