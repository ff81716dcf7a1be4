//! Manually ordered content collections (announcements, FAQ, categories, ...)

use super::repository::CatalogRepository;
use super::validation::validate_catalog_entry;
use crate::contract::{BackOfficeError, CatalogDraft, CatalogEntry, Collection};
use std::collections::HashSet;
use std::sync::Arc;

/// Domain service for ordered collections
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        collection: Collection,
        active_only: bool,
    ) -> Result<Vec<CatalogEntry>, BackOfficeError> {
        self.repo
            .list(collection, active_only)
            .await
            .map_err(BackOfficeError::internal)
    }

    /// Append a new entry at the end of the collection
    pub async fn create(
        &self,
        collection: Collection,
        draft: CatalogDraft,
    ) -> Result<CatalogEntry, BackOfficeError> {
        validate_catalog_entry(&draft)?;
        let next = self
            .repo
            .max_sort_order(collection)
            .await
            .map_err(BackOfficeError::internal)?
            .map_or(0, |max| max + 1);

        let entry = self
            .repo
            .create(collection, &draft, next)
            .await
            .map_err(BackOfficeError::internal)?;
        tracing::debug!(collection = collection.as_str(), id = entry.id, "entry created");
        Ok(entry)
    }

    pub async fn update(
        &self,
        collection: Collection,
        id: i64,
        draft: CatalogDraft,
    ) -> Result<CatalogEntry, BackOfficeError> {
        validate_catalog_entry(&draft)?;
        self.repo
            .update(collection, id, &draft)
            .await
            .map_err(BackOfficeError::internal)?
            .ok_or_else(|| BackOfficeError::not_found(collection.as_str(), id))
    }

    pub async fn delete(&self, collection: Collection, id: i64) -> Result<(), BackOfficeError> {
        let existed = self
            .repo
            .delete(collection, id)
            .await
            .map_err(BackOfficeError::internal)?;
        if !existed {
            return Err(BackOfficeError::not_found(collection.as_str(), id));
        }
        Ok(())
    }

    /// Persist a drag-and-drop ordering: each id gets its position as sort_order.
    ///
    /// Ids must be unique and belong to the collection; otherwise nothing is written.
    pub async fn reorder(
        &self,
        collection: Collection,
        ids: &[i64],
    ) -> Result<Vec<CatalogEntry>, BackOfficeError> {
        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(BackOfficeError::validation(format!(
                "id {} appears more than once in the new order",
                dup
            )));
        }

        let known: HashSet<i64> = self
            .repo
            .list(collection, false)
            .await
            .map_err(BackOfficeError::internal)?
            .into_iter()
            .map(|e| e.id)
            .collect();
        if let Some(unknown) = ids.iter().find(|id| !known.contains(*id)) {
            return Err(BackOfficeError::not_found(collection.as_str(), unknown));
        }

        self.repo
            .set_order(collection, ids)
            .await
            .map_err(BackOfficeError::internal)?;
        tracing::info!(collection = collection.as_str(), count = ids.len(), "collection reordered");

        self.list(collection, false).await
    }
}
