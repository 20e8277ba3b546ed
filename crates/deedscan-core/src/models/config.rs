//! Configuration structures for the deed pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::County;
use crate::error::{DeedscanError, Result};

/// Main configuration for deedscan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeedscanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Deed composition configuration.
    pub deed: DeedConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Legal description candidates shorter than this (in characters) are noise.
    pub min_legal_description_len: usize,

    /// Maximum characters read after an EXHIBIT A heading when no EXHIBIT B follows.
    pub exhibit_char_cap: usize,

    /// Characters skipped after the receipt acknowledgment phrase before the
    /// positional legal description capture starts (skips the grantee clause).
    pub acknowledgment_skip: usize,

    /// County used when none of the supported counties is mentioned.
    pub default_county: County,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_legal_description_len: 30,
            exhibit_char_cap: 2000,
            acknowledgment_skip: 250,
            default_county: County::LosAngeles,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum text length to consider a PDF as having a usable text layer.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

/// Trust transfer deed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeedConfig {
    /// Vesting phrase used when none is given.
    pub default_vesting: String,
}

impl Default for DeedConfig {
    fn default() -> Self {
        Self {
            default_vesting: "Single Man".to_string(),
        }
    }
}

impl DeedscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| DeedscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| DeedscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
