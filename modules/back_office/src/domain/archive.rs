//! Document archive abstraction for payment statement backups
//!
//! The back office only needs three capabilities from the backing store
//! (a cloud drive in production): connectivity, a per-month folder, and
//! uploading a document into that folder.

use crate::contract::Period;
use async_trait::async_trait;

/// Error type for archive operations
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Archive is not connected")]
    NotConnected,

    #[error("Archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive rejected the document: {0}")]
    Rejected(String),
}

/// Handle of a monthly folder inside the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFolder {
    pub id: String,
    pub name: String,
}

/// Trait for storing generated documents outside the database
#[async_trait]
pub trait DocumentArchive: Send + Sync {
    /// Whether the archive is configured and reachable
    async fn is_connected(&self) -> bool;

    /// Find or create the folder for a period (named `YYYY-MM`)
    async fn monthly_folder(&self, period: Period) -> Result<ArchiveFolder, ArchiveError>;

    /// Upload a document and return its archive file id
    async fn upload(
        &self,
        folder: &ArchiveFolder,
        file_name: &str,
        content: &[u8],
    ) -> Result<String, ArchiveError>;
}

/// Archive used when no backing store is configured
#[derive(Clone, Default)]
pub struct DisconnectedArchive;

#[async_trait]
impl DocumentArchive for DisconnectedArchive {
    async fn is_connected(&self) -> bool {
        false
    }

    async fn monthly_folder(&self, _period: Period) -> Result<ArchiveFolder, ArchiveError> {
        Err(ArchiveError::NotConnected)
    }

    async fn upload(
        &self,
        _folder: &ArchiveFolder,
        _file_name: &str,
        _content: &[u8],
    ) -> Result<String, ArchiveError> {
        Err(ArchiveError::NotConnected)
    }
}
