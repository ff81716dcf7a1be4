//! Creator management

use super::repository::CreatorRepository;
use super::validation::validate_creator;
use crate::contract::{BackOfficeError, Creator, CreatorDraft};
use std::sync::Arc;

/// Domain service for creator profiles
pub struct CreatorService {
    repo: Arc<dyn CreatorRepository>,
}

impl CreatorService {
    pub fn new(repo: Arc<dyn CreatorRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, draft: CreatorDraft) -> Result<Creator, BackOfficeError> {
        validate_creator(&draft)?;
        let creator = self
            .repo
            .create(&draft)
            .await
            .map_err(BackOfficeError::internal)?;
        tracing::info!(creator_id = creator.id, "creator created");
        Ok(creator)
    }

    pub async fn get(&self, id: i64) -> Result<Creator, BackOfficeError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(BackOfficeError::internal)?
            .ok_or_else(|| BackOfficeError::not_found("creator", id))
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<Creator>, BackOfficeError> {
        self.repo
            .list(active_only)
            .await
            .map_err(BackOfficeError::internal)
    }

    pub async fn update(&self, id: i64, draft: CreatorDraft) -> Result<Creator, BackOfficeError> {
        validate_creator(&draft)?;
        let creator = self
            .repo
            .update(id, &draft)
            .await
            .map_err(BackOfficeError::internal)?
            .ok_or_else(|| BackOfficeError::not_found("creator", id))?;
        tracing::info!(creator_id = id, "creator updated");
        Ok(creator)
    }

    pub async fn delete(&self, id: i64) -> Result<(), BackOfficeError> {
        let existed = self
            .repo
            .delete(id)
            .await
            .map_err(BackOfficeError::internal)?;
        if !existed {
            return Err(BackOfficeError::not_found("creator", id));
        }
        tracing::info!(creator_id = id, "creator deleted");
        Ok(())
    }
}
