//! Configuration for the back office module

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Back office module configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Public base URL of the contract agreement page; tokens are appended
    #[serde(default = "default_agreement_base_url")]
    pub agreement_base_url: String,

    /// Maximum site setting value size in bytes
    #[serde(default = "default_max_setting_value_size")]
    pub max_setting_value_size: usize,

    /// Directory for archived payment statements; unset disables archiving
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,

    /// Log every audit event on the `audit` tracing target
    #[serde(default = "default_true")]
    pub audit_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            agreement_base_url: default_agreement_base_url(),
            max_setting_value_size: default_max_setting_value_size(),
            archive_dir: None,
            audit_log: true,
        }
    }
}

fn default_agreement_base_url() -> String {
    "http://localhost:8080/contract/agree".to_string()
}

fn default_max_setting_value_size() -> usize {
    64 * 1024 // 64KB
}

fn default_true() -> bool {
    true
}
