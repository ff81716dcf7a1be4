//! Filesystem-backed statement archive
//!
//! Mirrors the cloud drive layout: one folder per month under a root
//! directory, file ids are paths relative to that root.

use crate::contract::Period;
use crate::domain::archive::{ArchiveError, ArchiveFolder, DocumentArchive};
use async_trait::async_trait;
use std::path::PathBuf;

pub struct LocalDirArchive {
    root: PathBuf,
}

impl LocalDirArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

#[async_trait]
impl DocumentArchive for LocalDirArchive {
    async fn is_connected(&self) -> bool {
        tokio::fs::metadata(&self.root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    async fn monthly_folder(&self, period: Period) -> Result<ArchiveFolder, ArchiveError> {
        if !self.is_connected().await {
            return Err(ArchiveError::NotConnected);
        }

        let name = period.to_string();
        tokio::fs::create_dir_all(self.root.join(&name)).await?;

        Ok(ArchiveFolder {
            id: name.clone(),
            name,
        })
    }

    async fn upload(
        &self,
        folder: &ArchiveFolder,
        file_name: &str,
        content: &[u8],
    ) -> Result<String, ArchiveError> {
        if !is_plain_file_name(file_name) {
            return Err(ArchiveError::Rejected(format!(
                "invalid file name '{}'",
                file_name
            )));
        }

        let path = self.root.join(&folder.id).join(file_name);
        tokio::fs::write(&path, content).await?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "document archived");

        Ok(format!("{}/{}", folder.id, file_name))
    }
}
