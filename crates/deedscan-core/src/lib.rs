//! Core library for deed OCR processing.
//!
//! This crate provides:
//! - Text-layer reading for PDFs (scanned PDFs still need an OCR pass)
//! - Rule-based deed field extraction (APN, grantee, address, city, county, legal description)
//! - Trust transfer deed and PCOR composition data

pub mod error;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod deed;
pub mod compose;

pub use error::{DeedscanError, Result};
pub use models::record::{County, DeedType, ExtractedDeedRecord};
pub use models::config::DeedscanConfig;
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use deed::{extract_record, DeedParser, ExtractionResult, RuleBasedDeedParser};
pub use compose::{TrustTransferDeed, pcor::PcorForm};
