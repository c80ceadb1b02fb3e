//! # Configuration
//!
//! Settings are read from a single YAML file. Its location comes from the
//! `FEE_DESK_CONFIG` environment variable, falling back to `fee_desk.yaml`
//! in the working directory. A missing file means all defaults.
//!
//! ## YAML Format
//!
//! ```yaml
//! school_name: "Green Valley School"
//! currency_symbol: "₹"
//! receipt_prefix: "RCP"
//! export_directory: "/home/admin/Documents/fee-desk-exports"
//! seed_sample_data: true
//! recent_payments_limit: 5
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::domain::invoice::InvoiceConfig;

pub const CONFIG_ENV_VAR: &str = "FEE_DESK_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "fee_desk.yaml";
const EXPORT_SUBDIRECTORY: &str = "fee-desk-exports";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Printed in document titles
    pub school_name: String,
    pub currency_symbol: String,
    /// Prefix of generated receipt numbers
    pub receipt_prefix: String,
    /// Where exported receipts and invoices are written
    pub export_directory: PathBuf,
    /// Load the sample students, fee structure and payment at startup
    pub seed_sample_data: bool,
    /// How many payments the dashboard lists as recent
    pub recent_payments_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            school_name: "School".to_string(),
            currency_symbol: "₹".to_string(),
            receipt_prefix: "RCP".to_string(),
            export_directory: default_export_directory(),
            seed_sample_data: true,
            recent_payments_limit: 5,
        }
    }
}

impl AppConfig {
    /// Load from `$FEE_DESK_CONFIG`, or `fee_desk.yaml` in the working directory
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load from a specific file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config = Self::from_yaml(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_content)?)
    }

    pub fn invoice_config(&self) -> InvoiceConfig {
        InvoiceConfig {
            school_name: self.school_name.clone(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

/// Documents folder, else home, else the working directory
fn default_export_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(EXPORT_SUBDIRECTORY)
}
