//! Rule-based deed parser.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::record::{DeedType, ExtractedDeedRecord};

use super::rules::{
    extract_grantee, extract_recording_date, grantee_becomes_grantor, AddressExtractor,
    CityExtractor, CountyExtractor, ExtractionMatch, FieldExtractor, LegalDescriptionExtractor,
    ParcelExtractor,
};
use super::DeedParser;

/// Result of deed extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted deed data.
    pub record: ExtractedDeedRecord,
    /// Kind of instrument, from keywords.
    pub deed_type: DeedType,
    /// Date the source deed was recorded, when stated.
    pub recording_date: Option<NaiveDate>,
    /// Rule that produced each extracted field.
    pub field_rules: BTreeMap<&'static str, &'static str>,
    /// Confidence of each extracted field.
    pub field_confidence: BTreeMap<&'static str, f32>,
    /// Extractable fields that came back empty.
    pub missing_fields: Vec<&'static str>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ExtractionResult {
    /// Result used when no text could be read from a deed; every field is
    /// left for manual entry.
    pub fn unreadable() -> Self {
        let record = ExtractedDeedRecord::empty();
        Self {
            missing_fields: record.missing_fields(),
            record,
            deed_type: DeedType::Unknown,
            recording_date: None,
            field_rules: BTreeMap::new(),
            field_confidence: BTreeMap::new(),
            warnings: Vec::new(),
            processing_time_ms: 0,
        }
    }
}

/// Deed parser built from the per-field rule lists.
pub struct RuleBasedDeedParser {
    config: ExtractionConfig,
    legal: LegalDescriptionExtractor,
}

impl RuleBasedDeedParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            legal: LegalDescriptionExtractor::from_config(&config),
            config,
        }
    }

    /// Extraction settings in use.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }
}

impl Default for RuleBasedDeedParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Records which rule produced each field.
#[derive(Default)]
struct Provenance {
    rules: BTreeMap<&'static str, &'static str>,
    confidence: BTreeMap<&'static str, f32>,
}

impl Provenance {
    fn take<T>(&mut self, field: &'static str, found: Option<ExtractionMatch<T>>) -> Option<T> {
        let found = found?;
        debug!("Found {} via {} ({:.2})", field, found.rule, found.confidence);
        self.rules.insert(field, found.rule);
        self.confidence.insert(field, found.confidence);
        Some(found.value)
    }
}

impl DeedParser for RuleBasedDeedParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut provenance = Provenance::default();
        let mut warnings = Vec::new();

        info!("Parsing deed from {} characters of text", text.len());

        let parcel_number = provenance
            .take("parcelNumber", ParcelExtractor::new().extract(text))
            .unwrap_or_default();

        let original_grantee = extract_grantee(text);
        let grantor_name = grantee_becomes_grantor(original_grantee.as_ref());
        provenance.take("grantorName", original_grantee);

        let property_address = provenance
            .take("propertyAddress", AddressExtractor::new().extract(text))
            .unwrap_or_default();

        let city = provenance
            .take("city", CityExtractor::new().extract(text))
            .unwrap_or_default();

        let county = provenance
            .take("county", CountyExtractor::new().extract(text))
            .unwrap_or_else(|| {
                warnings.push(format!(
                    "No supported county found, defaulting to {}",
                    self.config.default_county
                ));
                self.config.default_county
            });

        let legal_description = provenance
            .take("legalDescription", self.legal.extract(text))
            .unwrap_or_default();

        let record = ExtractedDeedRecord {
            parcel_number,
            trustee_name: grantor_name.clone(),
            grantor_name,
            trust_name: String::new(),
            trust_date: String::new(),
            mailing_address: property_address.clone(),
            property_address,
            city,
            county,
            legal_description,
        };

        let missing_fields = record.missing_fields();
        for field in &missing_fields {
            warnings.push(format!("Could not extract {}", field));
        }

        let deed_type = DeedType::detect(text);
        let recording_date = extract_recording_date(text);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} of 5 fields in {}ms",
            5 - missing_fields.len(),
            processing_time_ms
        );

        ExtractionResult {
            record,
            deed_type,
            recording_date,
            field_rules: provenance.rules,
            field_confidence: provenance.confidence,
            missing_fields,
            warnings,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deed::rules::EXHIBIT_A_FALLBACK;
    use crate::models::record::County;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> ExtractionResult {
        RuleBasedDeedParser::new().parse(text)
    }

    #[test]
    fn test_empty_input_yields_default_record() {
        let result = parse("");
        assert_eq!(result.record, ExtractedDeedRecord::default());
        assert_eq!(result.record.county, County::LosAngeles);
        assert_eq!(result.deed_type, DeedType::Unknown);
        assert_eq!(result.recording_date, None);
        assert_eq!(result.missing_fields.len(), 5);
        assert!(result.field_rules.is_empty());
    }

    #[test]
    fn test_unreadable_matches_empty_parse() {
        let unreadable = ExtractionResult::unreadable();
        let parsed = parse("");
        assert_eq!(unreadable.record, parsed.record);
        assert_eq!(unreadable.missing_fields, parsed.missing_fields);
        assert!(unreadable.warnings.is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "hereby GRANT(S) to CANDACE D. ROY, a married woman\nAPN: 8633-014-003";
        assert_eq!(parse(text).record, parse(text).record);
    }

    #[test]
    fn test_grantee_becomes_grantor_and_trustee() {
        let result = parse("JOHN SELLER hereby GRANT(S) to CANDACE D. ROY, a married woman as her sole and separate property");
        assert_eq!(result.record.grantor_name, "Candace D. Roy");
        assert_eq!(result.record.trustee_name, "Candace D. Roy");
        assert_eq!(result.field_rules.get("grantorName"), Some(&"hereby_grants_to"));
        assert!(result.record.trust_name.is_empty());
        assert!(result.record.trust_date.is_empty());
    }

    #[test]
    fn test_bearing_assessor_round_trip() {
        let text = "SITUATED IN THE COUNTY OF LOS ANGELES, BEARING ASSESSOR'S IDENTIFICATION NUMBER 8633-014-003";
        assert_eq!(parse(text).record.parcel_number, "8633-014-003");
    }

    #[test]
    fn test_exhibit_reference_fallback() {
        let result = parse("The legal description is attached as Exhibit A hereto.");
        assert_eq!(result.record.legal_description, EXHIBIT_A_FALLBACK);
    }

    #[test]
    fn test_address_fallback_and_mailing_default() {
        let text = "6821 Saint Estaban Street\nSituated in the County of Los Angeles\nZip 91042";
        let record = parse(text).record;
        assert_eq!(record.property_address, "6821 Saint Estaban Street, Los Angeles, CA 91042");
        assert_eq!(record.mailing_address, record.property_address);
        assert_eq!(record.city, "Los Angeles");
    }

    #[test]
    fn test_truncated_name_not_returned() {
        let result = parse("hereby GRANT(S) to ROY, a married woman");
        assert_eq!(result.record.grantor_name, "");
        assert_eq!(result.record.trustee_name, "");
        assert!(result.missing_fields.contains(&"grantorName"));
    }

    #[test]
    fn test_configured_default_county() {
        let config = ExtractionConfig {
            default_county: County::Ventura,
            ..ExtractionConfig::default()
        };
        let result = RuleBasedDeedParser::with_config(config).parse("no county here");
        assert_eq!(result.record.county, County::Ventura);
        assert!(result.warnings.iter().any(|w| w.contains("Ventura")));
    }

    #[test]
    fn test_deed_type_and_recording_date() {
        let result = parse("QUITCLAIM DEED\nRecorded 03/15/2019");
        assert_eq!(result.deed_type, DeedType::Quitclaim);
        assert_eq!(result.recording_date, NaiveDate::from_ymd_opt(2019, 3, 15));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(parse("APN: 8633-014-003")).unwrap();
        assert_eq!(json["record"]["parcelNumber"], "8633-014-003");
        assert_eq!(json["record"]["county"], "Los Angeles");
        assert_eq!(json["fieldRules"]["parcelNumber"], "apn_label");
        assert_eq!(json["deedType"], "Unknown");
    }
}
