//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod deed;
pub mod extract;
pub mod pcor;
pub mod source;

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;

use deedscan_core::{DeedscanConfig, ExtractedDeedRecord};

/// `~/.config/deedscan/config.json` (or the platform equivalent).
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deedscan")
        .join("config.json")
}

/// Load the `--config` file, else the default config file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DeedscanConfig> {
    if let Some(path) = config_path {
        return Ok(DeedscanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(DeedscanConfig::from_file(&default_path)?)
    } else {
        Ok(DeedscanConfig::default())
    }
}

/// Trust details the source deed never carries.
#[derive(Args)]
pub struct TrustArgs {
    /// Name of the receiving trust, e.g. "Roy Family Trust"
    #[arg(long)]
    trust_name: Option<String>,

    /// Date the trust was signed (YYYY-MM-DD or MM/DD/YYYY)
    #[arg(long)]
    trust_date: Option<String>,

    /// Initial trustee (default: the grantor)
    #[arg(long)]
    trustee: Option<String>,
}

impl TrustArgs {
    pub fn apply(&self, record: &mut ExtractedDeedRecord) {
        if let Some(name) = &self.trust_name {
            record.trust_name = name.trim().to_string();
        }
        if let Some(date) = &self.trust_date {
            record.trust_date = date.trim().to_string();
        }
        if let Some(trustee) = &self.trustee {
            record.trustee_name = trustee.trim().to_string();
        }
    }
}
