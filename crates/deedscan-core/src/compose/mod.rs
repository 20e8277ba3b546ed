//! Trust transfer deed composition.
//!
//! Turns an extracted record into the text blocks a deed renderer lays out.
//! Nothing here re-derives data from the source deed; every value comes from
//! the record.

pub mod pcor;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ComposeError;
use crate::models::config::DeedConfig;
use crate::models::record::ExtractedDeedRecord;

/// Printed in place of an empty field.
pub const BLANK: &str = "____________________";

const STATE: &str = "CA";

/// Trust transfer deed moving the grantor's property into a revocable trust.
#[derive(Debug, Clone)]
pub struct TrustTransferDeed<'a> {
    record: &'a ExtractedDeedRecord,
    vesting: String,
}

impl<'a> TrustTransferDeed<'a> {
    /// Create a deed with the default vesting ("Single Man").
    pub fn new(record: &'a ExtractedDeedRecord) -> Self {
        Self::from_config(record, &DeedConfig::default())
    }

    pub fn from_config(record: &'a ExtractedDeedRecord, config: &DeedConfig) -> Self {
        Self {
            record,
            vesting: config.default_vesting.clone(),
        }
    }

    /// Set how the grantor currently holds title, e.g. "Married Woman".
    pub fn with_vesting(mut self, vesting: impl Into<String>) -> Self {
        self.vesting = vesting.into();
        self
    }

    pub fn record(&self) -> &ExtractedDeedRecord {
        self.record
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let r = self.record;
        let fields = [
            ("grantorName", &r.grantor_name),
            ("trusteeName", &r.trustee_name),
            ("trustName", &r.trust_name),
            ("trustDate", &r.trust_date),
            ("parcelNumber", &r.parcel_number),
            ("propertyAddress", &r.property_address),
            ("city", &r.city),
            ("legalDescription", &r.legal_description),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Fail on the first missing required field.
    pub fn ensure_complete(&self) -> Result<(), ComposeError> {
        match self.missing_fields().first() {
            Some(field) => Err(ComposeError::MissingField(field.to_string())),
            None => Ok(()),
        }
    }

    pub fn recording_requested_by(&self) -> &str {
        or_blank(&self.record.trust_name)
    }

    /// Trustee, or the grantor's name up to the first comma.
    pub fn mail_to_name(&self) -> &str {
        let r = self.record;
        if !r.trustee_name.is_empty() {
            return &r.trustee_name;
        }
        or_blank(r.grantor_name.split(',').next().unwrap_or_default().trim())
    }

    /// "WHEN RECORDED MAIL TO" block: name, then the mailing address one
    /// comma-separated part per line.
    pub fn mail_to_lines(&self) -> Vec<String> {
        let mut lines = vec![self.mail_to_name().to_string()];
        lines.extend(split_address(&self.record.mailing_address));
        lines
    }

    /// "MAIL TAX STATEMENTS TO" block.
    pub fn mail_tax_statements_lines(&self) -> Vec<String> {
        if self.record.mailing_address.is_empty() {
            vec![
                self.mail_to_name().to_string(),
                or_blank(&self.record.property_address).to_string(),
            ]
        } else {
            split_address(&self.record.mailing_address)
        }
    }

    /// A transfer into the grantor's own revocable trust carries no consideration.
    pub fn documentary_transfer_tax(&self) -> Decimal {
        Decimal::ZERO
    }

    pub fn documentary_transfer_tax_line(&self) -> String {
        format!("DOCUMENTARY TRANSFER TAX IS: $ {:.2}", self.documentary_transfer_tax())
    }

    /// Granting clause naming grantor, trustee, trust and property location.
    pub fn granting_clause(&self) -> String {
        let r = self.record;
        let trust_date = if r.trust_date.is_empty() {
            BLANK.to_string()
        } else {
            format_trust_date(&r.trust_date)
        };

        format!(
            "GRANTOR(S) {}, {}, hereby GRANT(s) to {}, TRUSTEE OF THE {} DATED {}, AND ANY AMENDMENTS THERETO \
             the real property in the CITY OF {} County of {} State of {}, described as:",
            or_blank(&r.grantor_name),
            self.vesting.to_lowercase(),
            or_blank(&r.trustee_name),
            or_blank(&r.trust_name.to_uppercase()),
            trust_date,
            or_blank(&r.city.to_uppercase()),
            r.county,
            STATE,
        )
    }

    pub fn commonly_known_as(&self) -> String {
        format!("Commonly known as: {}", or_blank(&self.record.property_address))
    }

    /// Plain-text preview of the deed's first page.
    pub fn render_text(&self) -> String {
        let r = self.record;
        let mut out = Vec::new();

        out.push("RECORDING REQUESTED BY".to_string());
        out.push(self.recording_requested_by().to_string());
        out.push(String::new());
        out.push("WHEN RECORDED MAIL TO".to_string());
        out.extend(self.mail_to_lines());
        out.push(String::new());
        out.push(format!("APN: {}", or_blank(&r.parcel_number)));
        out.push(String::new());
        out.push("TRUST TRANSFER DEED".to_string());
        out.push("(Grant Deed Excluded from Reappraisal Under Proposition 13,".to_string());
        out.push("i.e., Calif. Const. Art 13A Section 1, et seq.)".to_string());
        out.push(String::new());
        out.push(self.documentary_transfer_tax_line());
        out.push(
            "The undersigned Grantor(s) declare(s) under penalty of perjury that the foregoing is true \
             and correct: THERE IS NO CONSIDERATION FOR THIS TRANSFER."
                .to_string(),
        );
        out.push(
            "[X] This conveyance transfers the Grantors interest into his or her revocable trust, R&T 11930."
                .to_string(),
        );
        out.push(String::new());
        out.push(self.granting_clause());
        out.push(String::new());
        out.push(or_blank(&r.legal_description).to_string());
        out.push(String::new());
        out.push(self.commonly_known_as());
        out.push(String::new());
        out.push("MAIL TAX STATEMENTS TO:".to_string());
        out.extend(self.mail_tax_statements_lines());

        out.join("\n")
    }
}

/// Format an ISO (`2024-01-15`) or US (`01/15/2024`) trust date as
/// "January 15, 2024"; anything else is returned as written.
pub fn format_trust_date(raw: &str) -> String {
    let raw = raw.trim();
    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn split_address(address: &str) -> Vec<String> {
    address
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn or_blank(value: &str) -> &str {
    if value.trim().is_empty() { BLANK } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::County;
    use pretty_assertions::assert_eq;

    fn record() -> ExtractedDeedRecord {
        ExtractedDeedRecord {
            parcel_number: "8633-014-003".to_string(),
            grantor_name: "Candace D. Roy".to_string(),
            trustee_name: "Candace D. Roy".to_string(),
            trust_name: "Roy Family Trust".to_string(),
            trust_date: "2024-01-15".to_string(),
            property_address: "6821 Saint Estaban Street, Los Angeles, CA 91042".to_string(),
            mailing_address: "6821 Saint Estaban Street, Los Angeles, CA 91042".to_string(),
            city: "Los Angeles".to_string(),
            county: County::LosAngeles,
            legal_description: "LOT 14 OF TRACT NO. 19560".to_string(),
        }
    }

    #[test]
    fn test_granting_clause() {
        let record = record();
        let deed = TrustTransferDeed::new(&record).with_vesting("Married Woman");
        assert_eq!(
            deed.granting_clause(),
            "GRANTOR(S) Candace D. Roy, married woman, hereby GRANT(s) to Candace D. Roy, \
             TRUSTEE OF THE ROY FAMILY TRUST DATED January 15, 2024, AND ANY AMENDMENTS THERETO \
             the real property in the CITY OF LOS ANGELES County of Los Angeles State of CA, described as:"
        );
    }

    #[test]
    fn test_default_vesting_lowercased() {
        let record = record();
        assert!(TrustTransferDeed::new(&record).granting_clause().contains(", single man, hereby"));
    }

    #[test]
    fn test_mail_to_lines() {
        let record = record();
        assert_eq!(
            TrustTransferDeed::new(&record).mail_to_lines(),
            vec!["Candace D. Roy", "6821 Saint Estaban Street", "Los Angeles", "CA 91042"]
        );
    }

    #[test]
    fn test_mail_to_falls_back_to_grantor() {
        let mut record = record();
        record.trustee_name.clear();
        record.grantor_name = "Candace D. Roy, a married woman".to_string();
        assert_eq!(TrustTransferDeed::new(&record).mail_to_name(), "Candace D. Roy");
    }

    #[test]
    fn test_transfer_tax_is_zero() {
        let record = record();
        let deed = TrustTransferDeed::new(&record);
        assert!(deed.documentary_transfer_tax().is_zero());
        assert_eq!(deed.documentary_transfer_tax_line(), "DOCUMENTARY TRANSFER TAX IS: $ 0.00");
    }

    #[test]
    fn test_missing_fields_from_extraction() {
        let mut record = record();
        record.trust_name.clear();
        record.trust_date.clear();
        let deed = TrustTransferDeed::new(&record);

        assert_eq!(deed.missing_fields(), vec!["trustName", "trustDate"]);
        assert_eq!(
            deed.ensure_complete(),
            Err(ComposeError::MissingField("trustName".to_string()))
        );
        assert!(deed.granting_clause().contains(&format!("TRUSTEE OF THE {} DATED {}", BLANK, BLANK)));
    }

    #[test]
    fn test_complete_record_passes() {
        let record = record();
        assert_eq!(TrustTransferDeed::new(&record).ensure_complete(), Ok(()));
    }

    #[test]
    fn test_format_trust_date() {
        assert_eq!(format_trust_date("2024-01-15"), "January 15, 2024");
        assert_eq!(format_trust_date("03/05/2021"), "March 5, 2021");
        assert_eq!(format_trust_date("sometime in May"), "sometime in May");
    }

    #[test]
    fn test_render_text_sections() {
        let record = record();
        let text = TrustTransferDeed::new(&record).render_text();
        assert!(text.starts_with("RECORDING REQUESTED BY\nRoy Family Trust\n"));
        assert!(text.contains("APN: 8633-014-003"));
        assert!(text.contains("Commonly known as: 6821 Saint Estaban Street, Los Angeles, CA 91042"));
        assert!(text.ends_with("MAIL TAX STATEMENTS TO:\n6821 Saint Estaban Street\nLos Angeles\nCA 91042"));
    }
}
