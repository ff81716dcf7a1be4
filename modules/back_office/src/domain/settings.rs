//! Site settings - generic key/value configuration store

use super::events::{publish_best_effort, AuditEvent, AuditPublisher};
use super::repository::SiteSettingsRepository;
use super::validation::{validate_setting_key, validate_setting_value};
use crate::contract::{BackOfficeError, SiteSetting};
use std::sync::Arc;

/// Domain service for site settings
pub struct SettingsService {
    repo: Arc<dyn SiteSettingsRepository>,
    audit: Arc<dyn AuditPublisher>,
    max_value_size: usize,
}

impl SettingsService {
    pub fn new(
        repo: Arc<dyn SiteSettingsRepository>,
        audit: Arc<dyn AuditPublisher>,
        max_value_size: usize,
    ) -> Self {
        Self {
            repo,
            audit,
            max_value_size,
        }
    }

    /// Value for `key`, or `default` when the key is unset
    pub async fn get(&self, key: &str, default: &str) -> Result<String, BackOfficeError> {
        Ok(self
            .find(key)
            .await?
            .map(|s| s.value)
            .unwrap_or_else(|| default.to_string()))
    }

    /// Boolean flag stored as text ("1", "true", "on", "yes")
    pub async fn get_bool(&self, key: &str, default: bool) -> Result<bool, BackOfficeError> {
        Ok(match self.find(key).await? {
            Some(setting) => parse_flag(&setting.value),
            None => default,
        })
    }

    pub async fn find(&self, key: &str) -> Result<Option<SiteSetting>, BackOfficeError> {
        validate_setting_key(key)?;
        self.repo.find(key).await.map_err(BackOfficeError::internal)
    }

    pub async fn list(&self) -> Result<Vec<SiteSetting>, BackOfficeError> {
        self.repo.list_all().await.map_err(BackOfficeError::internal)
    }

    /// Create or replace a setting
    pub async fn set(&self, key: &str, value: &str) -> Result<SiteSetting, BackOfficeError> {
        validate_setting_key(key)?;
        validate_setting_value(value, self.max_value_size)?;

        let setting = self
            .repo
            .upsert(key, value)
            .await
            .map_err(BackOfficeError::internal)?;

        tracing::info!(key, "site setting updated");
        publish_best_effort(self.audit.as_ref(), AuditEvent::setting_changed(key, false)).await;
        Ok(setting)
    }

    pub async fn delete(&self, key: &str) -> Result<(), BackOfficeError> {
        validate_setting_key(key)?;

        let existed = self
            .repo
            .delete(key)
            .await
            .map_err(BackOfficeError::internal)?;
        if !existed {
            return Err(BackOfficeError::not_found("site_setting", key));
        }

        tracing::info!(key, "site setting deleted");
        publish_best_effort(self.audit.as_ref(), AuditEvent::setting_changed(key, true)).await;
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}
