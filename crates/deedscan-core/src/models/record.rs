//! Deed record produced by field extraction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeedscanError;

/// Structured data extracted from one recorded deed.
///
/// Every field is always present; a field that could not be extracted is an
/// empty string, never a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedDeedRecord {
    /// Assessor's parcel number, e.g. `8633-014-003`.
    pub parcel_number: String,

    /// Party conveying the property into the trust. This is the grantee of
    /// the original recorded deed.
    pub grantor_name: String,

    /// Initial trustee; starts out as the grantor.
    pub trustee_name: String,

    /// Never present in the source deed, supplied downstream.
    pub trust_name: String,

    /// Never present in the source deed, supplied downstream.
    pub trust_date: String,

    /// Street address of the property.
    pub property_address: String,

    /// Address for tax statements; defaults to the property address.
    pub mailing_address: String,

    /// City, title-cased.
    pub city: String,

    /// County the property lies in.
    pub county: County,

    /// Legal description text or an Exhibit A pointer.
    pub legal_description: String,
}

impl ExtractedDeedRecord {
    /// The record substituted when no text could be obtained for a deed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Names of the extractable fields that came back empty.
    ///
    /// Trust name and trust date are never extracted, so they are not reported.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("parcelNumber", &self.parcel_number),
            ("grantorName", &self.grantor_name),
            ("propertyAddress", &self.property_address),
            ("city", &self.city),
            ("legalDescription", &self.legal_description),
        ];

        fields
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// Five-digit zip code at the end of the property address, if any.
    pub fn zip_code(&self) -> Option<&str> {
        let address = self.property_address.trim_end();
        let tail = address.get(address.len().checked_sub(5)?..)?;
        let preceded_by_digit = address[..address.len() - 5]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit());

        (tail.chars().all(|c| c.is_ascii_digit()) && !preceded_by_digit).then_some(tail)
    }
}

/// Counties with supported PCOR templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum County {
    #[default]
    #[serde(rename = "Los Angeles")]
    LosAngeles,
    #[serde(rename = "Ventura")]
    Ventura,
    #[serde(rename = "Riverside")]
    Riverside,
    #[serde(rename = "San Bernardino")]
    SanBernardino,
    #[serde(rename = "Orange")]
    Orange,
}

impl County {
    /// All supported counties, in display order.
    pub const ALL: [County; 5] = [
        County::LosAngeles,
        County::Ventura,
        County::Riverside,
        County::SanBernardino,
        County::Orange,
    ];

    /// Display name, e.g. "San Bernardino".
    pub fn name(&self) -> &'static str {
        match self {
            County::LosAngeles => "Los Angeles",
            County::Ventura => "Ventura",
            County::Riverside => "Riverside",
            County::SanBernardino => "San Bernardino",
            County::Orange => "Orange",
        }
    }

    /// Match a county name regardless of case and inner whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: Vec<String> = name.split_whitespace().map(str::to_lowercase).collect();
        Self::ALL.into_iter().find(|county| {
            county
                .name()
                .split(' ')
                .map(str::to_lowercase)
                .eq(wanted.iter().cloned())
        })
    }
}

impl fmt::Display for County {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for County {
    type Err = DeedscanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DeedscanError::InvalidCounty(s.trim().to_string()))
    }
}

/// Kind of instrument the source deed is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeedType {
    #[serde(rename = "Grant Deed")]
    Grant,
    #[serde(rename = "Quitclaim Deed")]
    Quitclaim,
    #[serde(rename = "Warranty Deed")]
    Warranty,
    #[serde(rename = "Trust Deed")]
    Trust,
    #[default]
    Unknown,
}

impl DeedType {
    /// Detect the deed type from keywords in the text.
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();

        if lower.contains("quitclaim") || lower.contains("quit claim") {
            DeedType::Quitclaim
        } else if lower.contains("grant deed") {
            DeedType::Grant
        } else if lower.contains("warranty deed") {
            DeedType::Warranty
        } else if lower.contains("trust deed") {
            DeedType::Trust
        } else {
            DeedType::Unknown
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            DeedType::Grant => "Grant Deed",
            DeedType::Quitclaim => "Quitclaim Deed",
            DeedType::Warranty => "Warranty Deed",
            DeedType::Trust => "Trust Deed",
            DeedType::Unknown => "Unknown",
        }
    }
}
