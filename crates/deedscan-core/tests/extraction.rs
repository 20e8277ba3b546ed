//! Integration tests for deed extraction
//!
//! These run the full parser over OCR dumps of typical California deeds and
//! feed the records into the deed and PCOR composers.

use chrono::NaiveDate;
use deedscan_core::compose::pcor::template_file;
use deedscan_core::deed::rules::EXHIBIT_A_FALLBACK;
use deedscan_core::{
    extract_record, County, DeedParser, DeedType, ExtractedDeedRecord, PcorForm,
    RuleBasedDeedParser, TrustTransferDeed,
};
use pretty_assertions::assert_eq;

const GRANT_DEED_LOT: &str = include_str!("fixtures/grant_deed_lot.txt");
const QUITCLAIM_EXHIBIT_A: &str = include_str!("fixtures/quitclaim_exhibit_a.txt");
const GRANT_DEED_ACKNOWLEDGMENT: &str = include_str!("fixtures/grant_deed_acknowledgment.txt");

#[test]
fn test_grant_deed_with_lot_description() {
    let result = RuleBasedDeedParser::new().parse(GRANT_DEED_LOT);

    assert_eq!(
        result.record,
        ExtractedDeedRecord {
            parcel_number: "2563-012-018".to_string(),
            grantor_name: "Candace D. Roy".to_string(),
            trustee_name: "Candace D. Roy".to_string(),
            trust_name: String::new(),
            trust_date: String::new(),
            property_address: "6821 Saint Estaban Street, Los Angeles (Tujunga area), CA 91042".to_string(),
            mailing_address: "6821 Saint Estaban Street, Los Angeles (Tujunga area), CA 91042".to_string(),
            city: "Los Angeles".to_string(),
            county: County::LosAngeles,
            legal_description: "LOT 14 OF TRACT NO. 19560, AS PER MAP RECORDED IN BOOK 512 PAGES 1 TO 4 \
                                INCLUSIVE OF MAPS, IN THE OFFICE OF THE COUNTY RECORDER OF SAID COUNTY."
                .to_string(),
        }
    );
    assert_eq!(result.deed_type, DeedType::Grant);
    assert_eq!(result.recording_date, NaiveDate::from_ymd_opt(2016, 5, 12));
    assert!(result.missing_fields.is_empty());
    assert_eq!(result.field_rules.get("grantorName"), Some(&"when_recorded_mail_to"));
    assert_eq!(result.field_rules.get("legalDescription"), Some(&"lot_or_parcel"));
}

#[test]
fn test_quitclaim_with_exhibit_a_body() {
    let result = RuleBasedDeedParser::new().parse(QUITCLAIM_EXHIBIT_A);
    let record = &result.record;

    assert_eq!(record.parcel_number, "0640-171-085");
    assert_eq!(record.grantor_name, "Jose Lopez Garcia");
    assert_eq!(record.property_address, "455 Harbor Boulevard, Oxnard, CA 93035");
    assert_eq!(record.city, "Oxnard");
    assert_eq!(record.county, County::Ventura);
    assert_eq!(
        record.legal_description,
        "PARCEL 2 OF PARCEL MAP NO. 4123, IN THE CITY OF OXNARD, COUNTY OF VENTURA, \
         STATE OF CALIFORNIA, AS PER MAP FILED IN BOOK 46, PAGE 12 OF PARCEL MAPS."
    );
    assert_eq!(result.deed_type, DeedType::Quitclaim);
    assert_eq!(result.field_rules.get("legalDescription"), Some(&"exhibit_a_body"));
}

#[test]
fn test_quitclaim_without_exhibit_page() {
    let first_page = QUITCLAIM_EXHIBIT_A
        .split("EXHIBIT \"A\"")
        .next()
        .unwrap();
    let record = extract_record(first_page);

    assert_eq!(record.legal_description, EXHIBIT_A_FALLBACK);
    assert_eq!(record.parcel_number, "0640-171-085");
}

#[test]
fn test_positional_description_after_acknowledgment() {
    let result = RuleBasedDeedParser::new().parse(GRANT_DEED_ACKNOWLEDGMENT);
    let record = &result.record;

    assert_eq!(record.parcel_number, "0201-252-140");
    assert_eq!(record.grantor_name, "Thomas E. Reynolds");
    assert_eq!(record.county, County::SanBernardino);
    assert_eq!(
        record.legal_description,
        "THE WEST 75 FEET OF THE EAST 300 FEET OF THE NORTH HALF OF THE SOUTHWEST QUARTER \
         OF SECTION 14, TOWNSHIP 1 SOUTH, RANGE 4 WEST"
    );
    assert_eq!(record.property_address, "");
    assert_eq!(result.missing_fields, vec!["propertyAddress"]);
    assert_eq!(result.field_rules.get("legalDescription"), Some(&"after_acknowledgment"));
}

#[test]
fn test_garbage_input_never_panics() {
    let long_lot_run = "LOT 1 ".repeat(2000);
    let inputs = [
        "",
        "\u{0}\u{1}\u{2}",
        "ÄÖÜ ñ 日本語 receipt of which is hereby acknowledged 日本",
        "EXHIBIT A EXHIBIT A EXHIBIT B",
        "receipt of which is hereby acknowledged APN 1",
        long_lot_run.as_str(),
    ];

    for input in inputs {
        let record = extract_record(input);
        assert!(County::ALL.contains(&record.county));
        assert_eq!(record.trust_name, "");
        assert_eq!(record.trust_date, "");
        assert_eq!(record.trustee_name, record.grantor_name);
        assert_eq!(record.mailing_address, record.property_address);
    }
}

#[test]
fn test_extraction_is_idempotent() {
    for text in [GRANT_DEED_LOT, QUITCLAIM_EXHIBIT_A, GRANT_DEED_ACKNOWLEDGMENT] {
        assert_eq!(extract_record(text), extract_record(text));
    }
}

#[test]
fn test_record_json_shape() {
    let json = serde_json::to_value(extract_record("")).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

    assert_eq!(keys.len(), 10);
    for key in [
        "parcelNumber",
        "grantorName",
        "trusteeName",
        "trustName",
        "trustDate",
        "propertyAddress",
        "mailingAddress",
        "city",
        "county",
        "legalDescription",
    ] {
        assert!(keys.contains(&key), "missing key {key}");
    }
    assert_eq!(json["county"], "Los Angeles");
}

#[test]
fn test_extracted_record_feeds_composers() {
    let mut record = extract_record(QUITCLAIM_EXHIBIT_A);
    let deed = TrustTransferDeed::new(&record);
    assert_eq!(deed.missing_fields(), vec!["trustName", "trustDate"]);

    record.trust_name = "Garcia Living Trust".to_string();
    record.trust_date = "2024-06-01".to_string();
    let deed = TrustTransferDeed::new(&record);
    assert!(deed.ensure_complete().is_ok());
    assert!(deed
        .granting_clause()
        .contains("TRUSTEE OF THE GARCIA LIVING TRUST DATED June 1, 2024"));
    assert!(deed.granting_clause().contains("CITY OF OXNARD County of Ventura"));

    let pcor = PcorForm::from_record(&record, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    assert_eq!(pcor.template_file(), template_file(County::Ventura));
    assert_eq!(pcor.value_for("ZIP").as_deref(), Some("93035"));
    assert!(pcor.ensure_complete().is_ok());
}
