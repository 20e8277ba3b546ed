//! Preliminary change of ownership report (PCOR) form data.
//!
//! Each county publishes its own PCOR, and field names differ between the
//! PDFs, so every value is offered under all of its known aliases.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ComposeError;
use crate::models::record::{County, ExtractedDeedRecord};

const BUYER_NAME_AND_ADDRESS: &[&str] = &[
    "NAME AND MAILING ADDRESS OF BUYER/TRANSFEREE",
    "Name and mailing address of buyer/transferee",
    "Text1",
];
const BUYER_NAME: &[&str] = &["Buyer Name", "BuyerName"];
const PARCEL_NUMBER: &[&str] = &[
    "ASSESSOR'S PARCEL NUMBER",
    "Assessors parcel number",
    "ASSESSORS PARCEL NUMBER",
    "APN",
    "Text2",
];
const SELLER: &[&str] = &["SELLER/TRANSFEROR", "SELLERTRANSFEROR", "seller transferor", "Text3"];
const PROPERTY_ADDRESS: &[&str] = &[
    "STREET ADDRESS OR PHYSICAL LOCATION OF REAL PROPERTY",
    "street address or physical location of real property",
    "Property Address",
    "Text4",
];
const TRANSFER_MONTH: &[&str] = &["MO", "Month"];
const TRANSFER_DAY: &[&str] = &["DAY", "Day"];
const TRANSFER_YEAR: &[&str] = &["YEAR", "Year"];
const MAIL_TAX_NAME: &[&str] = &[
    "MAIL PROPERTY TAX INFORMATION TO (NAME)",
    "MAIL PROPERTY TAX INFORMATION TO NAME",
    "MailTaxName",
];
const MAIL_TAX_ADDRESS: &[&str] = &[
    "MAIL PROPERTY TAX INFORMATION TO (ADDRESS)",
    "MAIL PROPERTY TAX INFORMATION TO ADDRESS",
    "MailTaxAddress",
];
const CITY: &[&str] = &["CITY", "City"];
const STATE: &[&str] = &["STATE", "State"];
const ZIP: &[&str] = &["ZIP CODE", "ZIP"];
const PURCHASE_PRICE: &[&str] = &["Total purchase price", "TotalPurchasePrice"];
const SIGNER_NAME: &[&str] = &[
    "Name of buyer/transferee/personal representative/corporate officer (please print)",
    "Name of buyer transferee personal representative corporate officer please print",
    "SignatureName",
];
const SIGNER_TITLE: &[&str] = &["title", "Title"];
const SIGNED_DATE: &[&str] = &[
    "Date signed by buyer/transferee or corporate officer",
    "Date signed by buyer transferee or corporate officer",
    "SignatureDate",
];

/// A checkbox on the PCOR, addressed by its position among the form's checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcorCheckbox {
    pub index: usize,
    pub label: &'static str,
}

/// Boxes checked for a transfer into the grantor's revocable trust; every
/// other checkbox on the form is cleared.
pub const TRUST_TRANSFER_CHECKBOXES: [PcorCheckbox; 6] = [
    PcorCheckbox { index: 0, label: "Principal residence: yes" },
    PcorCheckbox { index: 3, label: "Disabled veteran: no" },
    PcorCheckbox { index: 23, label: "Section L.1: transfer into a revocable trust" },
    PcorCheckbox { index: 24, label: "Section L.1: transfer into a revocable trust" },
    PcorCheckbox { index: 25, label: "Section L.1: transfer into a revocable trust" },
    PcorCheckbox { index: 26, label: "Section L.1: transfer into a revocable trust" },
];

/// Field values for a county PCOR.
#[derive(Debug, Clone)]
pub struct PcorForm<'a> {
    record: &'a ExtractedDeedRecord,
    transfer_date: NaiveDate,
}

impl<'a> PcorForm<'a> {
    /// Form for a transfer dated `transfer_date` (normally today).
    pub fn from_record(record: &'a ExtractedDeedRecord, transfer_date: NaiveDate) -> Self {
        Self {
            record,
            transfer_date,
        }
    }

    pub fn county(&self) -> County {
        self.record.county
    }

    /// Template file for the record's county.
    pub fn template_file(&self) -> &'static str {
        template_file(self.record.county)
    }

    /// Required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let r = self.record;
        let fields = [
            ("parcelNumber", &r.parcel_number),
            ("propertyAddress", &r.property_address),
            ("grantorName", &r.grantor_name),
            ("trustName", &r.trust_name),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn ensure_complete(&self) -> Result<(), ComposeError> {
        match self.missing_fields().first() {
            Some(field) => Err(ComposeError::MissingField(field.to_string())),
            None => Ok(()),
        }
    }

    /// No consideration is paid on a trust transfer.
    pub fn purchase_price(&self) -> Decimal {
        Decimal::ZERO
    }

    /// `(form field name, value)` pairs for every alias, skipping empty values.
    pub fn text_field_values(&self) -> Vec<(&'static str, String)> {
        self.field_groups()
            .into_iter()
            .flat_map(|(names, value)| names.iter().map(move |name| (*name, value.clone())))
            .collect()
    }

    /// One entry per form field: all of its aliases and its non-empty value.
    fn field_groups(&self) -> Vec<(&'static [&'static str], String)> {
        let r = self.record;
        let buyer = first_non_empty(&r.trustee_name, &r.grantor_name);
        let mailing = first_non_empty(&r.mailing_address, &r.property_address);
        let month = self.transfer_date.format("%m").to_string();
        let day = self.transfer_date.format("%d").to_string();
        let year = self.transfer_date.format("%Y").to_string();
        let signed = self.transfer_date.format("%m/%d/%Y").to_string();

        let groups: Vec<(&'static [&'static str], String)> = vec![
            (BUYER_NAME_AND_ADDRESS, format!("{}\n{}", buyer, mailing).trim().to_string()),
            (BUYER_NAME, r.trust_name.clone()),
            (PARCEL_NUMBER, r.parcel_number.clone()),
            (SELLER, r.grantor_name.clone()),
            (PROPERTY_ADDRESS, r.property_address.clone()),
            (TRANSFER_MONTH, month),
            (TRANSFER_DAY, day),
            (TRANSFER_YEAR, year),
            (MAIL_TAX_NAME, r.trust_name.clone()),
            (MAIL_TAX_ADDRESS, mailing.to_string()),
            (CITY, r.city.clone()),
            (STATE, "CA".to_string()),
            (ZIP, r.zip_code().unwrap_or_default().to_string()),
            (PURCHASE_PRICE, format!("${:.2}", self.purchase_price())),
            (SIGNER_NAME, buyer.to_string()),
            (SIGNER_TITLE, "Trustee".to_string()),
            (SIGNED_DATE, signed),
        ];

        groups
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }

    /// Value for a form field by name, ignoring case.
    pub fn value_for(&self, field_name: &str) -> Option<String> {
        self.text_field_values()
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field_name))
            .map(|(_, value)| value)
    }

    /// Checkbox positions to check.
    pub fn checkboxes(&self) -> &'static [PcorCheckbox] {
        &TRUST_TRANSFER_CHECKBOXES
    }

    pub fn is_checked(&self, index: usize) -> bool {
        TRUST_TRANSFER_CHECKBOXES.iter().any(|cb| cb.index == index)
    }

    /// Plain-text summary of the values that would be written to the form.
    pub fn render_text(&self) -> String {
        let mut out = vec![
            format!("PCOR template: {} ({} County)", self.template_file(), self.county()),
            String::new(),
        ];

        // Each field once, under its first alias
        for (names, value) in self.field_groups() {
            out.push(format!("{}: {}", names[0], value.replace('\n', " / ")));
        }

        out.push(String::new());
        for checkbox in self.checkboxes() {
            out.push(format!("[X] #{} {}", checkbox.index, checkbox.label));
        }

        out.join("\n")
    }
}

/// PCOR template file name for a county.
pub fn template_file(county: County) -> &'static str {
    match county {
        County::LosAngeles => "la-county-pcor.pdf",
        County::Ventura => "ventura-pcor.pdf",
        County::Orange => "orange-county-pcor.pdf",
        County::SanBernardino => "san-bernardino-pcor.pdf",
        County::Riverside => "riverside-pcor.pdf",
    }
}

fn first_non_empty<'s>(preferred: &'s str, fallback: &'s str) -> &'s str {
    if preferred.is_empty() { fallback } else { preferred }
}
