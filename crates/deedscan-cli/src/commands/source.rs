//! Reading deed text and records from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use deedscan_core::models::config::PdfConfig;
use deedscan_core::{DeedParser, DeedscanConfig, ExtractedDeedRecord, PdfExtractor, RuleBasedDeedParser};

/// Deed sources: OCR text dumps and PDFs with a text layer.
pub const DEED_EXTENSIONS: [&str; 2] = ["txt", "pdf"];

pub fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_deed_source(path: &Path) -> bool {
    DEED_EXTENSIONS.contains(&extension(path).as_str())
}

/// Read the recognized text of a deed.
pub fn read_deed_text(path: &Path, config: &PdfConfig) -> anyhow::Result<String> {
    let text = match extension(path).as_str() {
        "txt" => fs::read_to_string(path)?,
        "pdf" => {
            let data = fs::read(path)?;
            PdfExtractor::read_text_layer(&data, config)?
        }
        other => anyhow::bail!("Unsupported file format: {}", other),
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text found in {}", path.display());
    }

    debug!("Read {} characters from {}", text.len(), path.display());
    Ok(text)
}

/// Load a record: a `.json` file is taken as an extracted record, anything
/// else is read as a deed and extracted.
pub fn read_record(path: &Path, config: &DeedscanConfig) -> anyhow::Result<ExtractedDeedRecord> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    if extension(path) == "json" {
        let content = fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&content)?);
    }

    let text = read_deed_text(path, &config.pdf)?;
    let parser = RuleBasedDeedParser::with_config(config.extraction.clone());
    Ok(parser.parse(&text).record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deed_source_extensions() {
        assert!(is_deed_source(Path::new("deeds/roy.TXT")));
        assert!(is_deed_source(Path::new("roy.pdf")));
        assert!(!is_deed_source(Path::new("roy.png")));
        assert!(!is_deed_source(Path::new("roy")));
    }

    #[test]
    fn test_empty_text_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "  \n\t").unwrap();
        assert!(read_deed_text(&path, &PdfConfig::default()).is_err());
    }

    #[test]
    fn test_read_record_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        fs::write(&path, r#"{"parcelNumber": "8633-014-003", "county": "Orange"}"#).unwrap();

        let record = read_record(&path, &DeedscanConfig::default()).unwrap();
        assert_eq!(record.parcel_number, "8633-014-003");
        assert_eq!(record.county, deedscan_core::County::Orange);
        assert_eq!(record.grantor_name, "");
    }
}
