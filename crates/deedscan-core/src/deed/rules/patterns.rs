//! Regex patterns for California deed extraction.
//!
//! Each field has its patterns listed from most specific (labeled) to most
//! generic (bare). Capture group 1 always holds the candidate value.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Parcel number (APN) patterns
    pub static ref APN_BEARING_ASSESSOR: Regex = Regex::new(
        r"(?i)(?:BEARING\s+)?ASSESSOR['’\s]?S?\s+IDENTIFICATION\s+NUMBER[:\s]*([0-9]{4}-?[0-9]{3}-?[0-9]{3})"
    ).unwrap();

    pub static ref APN_AP_HASH: Regex = Regex::new(
        r"(?i)\bAP#:?\s*([0-9]{4}-?[0-9]{3}-?[0-9]{3})"
    ).unwrap();

    pub static ref APN_LABELED: Regex = Regex::new(
        r"(?i)\bA\.?P\.?N\.?[:\s#]*([0-9]{4}[-\s]?[0-9]{3}[-\s]?[0-9]{3})"
    ).unwrap();

    pub static ref APN_ASSESSOR_PARCEL: Regex = Regex::new(
        r"(?i)Assessor['’\s]?s?\s+(?:Parcel|Identification)\s+(?:Number|No\.?)[:\s]*([0-9][0-9\- ]*[0-9])"
    ).unwrap();

    pub static ref APN_PARCEL_NUMBER: Regex = Regex::new(
        r"(?i)\bParcel\s+(?:Number|No\.?)[:\s]*([0-9][0-9\- ]*[0-9])"
    ).unwrap();

    pub static ref APN_BARE: Regex = Regex::new(
        r"\b([0-9]{4}-?[0-9]{3}-?[0-9]{3})\b"
    ).unwrap();

    // Grantee patterns (the grantee of the recorded deed)
    pub static ref GRANTEE_MAIL_TO: Regex = Regex::new(
        r"(?i)WHEN\s+RECORDED(?s:.){0,50}?MAIL\s+TO:?\s*([A-Z][A-Z \t.'\-]+)"
    ).unwrap();

    pub static ref GRANTEE_HEREBY_GRANTS: Regex = Regex::new(
        r"(?i:hereby\s+GRANTS?(?:\(S\))?\s+to)\s+([A-Z][A-Za-z \t.'\-]+?)\s*(?:,|\n|$)"
    ).unwrap();

    pub static ref GRANTEE_LABEL: Regex = Regex::new(
        r"(?im)\bGRANTEE(?:\(S\)|S)?\s*:\s*([A-Z][A-Z \t.'\-]+?)\s*(?:,|$)"
    ).unwrap();

    pub static ref GRANTEE_CONVEYS_TO: Regex = Regex::new(
        r"(?i:conveys?|grants?|transfers?)\s+(?i:to)\s+([A-Z][a-z]+(?:\s+[A-Z]\.?)?(?:\s+[A-Z][a-z]+)+)\s*,\s*(?i:an?)\s"
    ).unwrap();

    pub static ref GRANTEE_MARITAL: Regex = Regex::new(
        r"\b([A-Z][A-Za-z]+(?:\s+[A-Z]\.?)?\s+[A-Z][A-Za-z]+),\s*(?i:an?\s+(?:married|single|unmarried|widowed))"
    ).unwrap();

    // Trailing clauses removed from captured names
    pub static ref TRAILING_ARTICLE_CLAUSE: Regex = Regex::new(
        r"(?is),\s*(?:a|an)\s+.*$"
    ).unwrap();

    pub static ref TRAILING_AS_CLAUSE: Regex = Regex::new(
        r"(?is)\s+as\s+.*$"
    ).unwrap();

    pub static ref TRAILING_MARITAL_CLAUSE: Regex = Regex::new(
        r"(?is)\s+an?\s+(?:married|single|unmarried|widowed)\b.*$"
    ).unwrap();

    // Property address patterns
    pub static ref ADDRESS_COMMONLY_KNOWN: Regex = Regex::new(
        r"(?i)(?:commonly\s+known\s+as|property\s+address|located\s+at)[:\s]+([0-9]{1,6}[ \t]+[^\n]+?,?[ \t]+(?:CA|California)[ \t]+[0-9]{5})\b"
    ).unwrap();

    pub static ref ADDRESS_WITH_AREA: Regex = Regex::new(
        r"(?i)\b([0-9]{3,6}[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*[ \t]+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Boulevard|Blvd|Lane|Ln|Way|Court|Ct|Circle|Cir|Place|Pl)\.?,?\s+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*(?:\s*\([^)]+\))?,?\s+(?:CA|California)\s+[0-9]{5})\b"
    ).unwrap();

    pub static ref ADDRESS_FULL: Regex = Regex::new(
        r"(?i)\b([0-9]{3,6}[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*[ \t]+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Boulevard|Blvd|Lane|Ln|Way|Court|Ct)\.?,?\s+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?,?\s+(?:CA|California)\s+[0-9]{5})\b"
    ).unwrap();

    pub static ref STREET_FRAGMENT: Regex = Regex::new(
        r"(?i)\b([0-9]{3,6}[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*[ \t]+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Boulevard|Blvd|Lane|Ln|Way|Court|Ct)\b\.?)"
    ).unwrap();

    pub static ref ZIP_CODE: Regex = Regex::new(
        r"\b([0-9]{5})\b"
    ).unwrap();

    // City patterns
    pub static ref CITY_WITH_AREA: Regex = Regex::new(
        r"(?i)([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?)\s*\([^)]+\),?\s+(?:CA|California)\b"
    ).unwrap();

    pub static ref CITY_OF: Regex = Regex::new(
        r"(?i)\bCITY\s+OF\s+([A-Z\s]+?)(?:,|\s+COUNTY)"
    ).unwrap();

    pub static ref CITY_BEFORE_STATE: Regex = Regex::new(
        r"(?i),\s*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?),\s*(?:CA|California)\b"
    ).unwrap();

    pub static ref CITY_IN_THE_CITY_OF: Regex = Regex::new(
        r"(?i)\bIN\s+THE\s+CITY\s+OF\s+([A-Z]+)"
    ).unwrap();

    pub static ref CITY_KNOWN: Regex = Regex::new(
        r"(?i)\b(Los\s+Angeles|Ventura|Riverside|San\s+Bernardino|Orange|Pasadena|Glendale|Burbank|Santa\s+Monica|Tujunga|Glendora)\b"
    ).unwrap();

    // County patterns (restricted to the supported counties)
    pub static ref COUNTY_OF: Regex = Regex::new(
        r"(?i)\bCounty\s+of\s+(Los\s+Angeles|Ventura|Riverside|San\s+Bernardino|Orange)\b"
    ).unwrap();

    pub static ref COUNTY_SUFFIX: Regex = Regex::new(
        r"(?i)\b(Los\s+Angeles|Ventura|Riverside|San\s+Bernardino|Orange)\s+County\b"
    ).unwrap();

    // Legal description patterns
    pub static ref EXHIBIT_A_REFERENCE: Regex = Regex::new(
        r#"(?i)(?:legal\s+description|property\s+description|described)\s+(?:is\s+)?(?:attached\s+(?:hereto\s+)?as|in|on)\s+Exhibit\s+["'“]?A\b"#
    ).unwrap();

    pub static ref EXHIBIT_A_HEADING_LINE: Regex = Regex::new(
        r#"(?im)^[ \t]*EXHIBIT\s+["'“]?A\b["'”]?"#
    ).unwrap();

    pub static ref EXHIBIT_A_HEADING: Regex = Regex::new(
        r#"\bEXHIBIT\s+["'“]?A\b["'”]?"#
    ).unwrap();

    pub static ref EXHIBIT_B_HEADING: Regex = Regex::new(
        r#"(?i)\bEXHIBIT\s+["'“]?B\b"#
    ).unwrap();

    pub static ref EXHIBIT_A_LABEL: Regex = Regex::new(
        r#"(?i)EXHIBIT\s+["'“]?A\b["'”]?[:\s]*"#
    ).unwrap();

    pub static ref LEGAL_DESCRIPTION_LABEL: Regex = Regex::new(
        r"(?i)LEGAL\s+DESCRIPTION[:\s]*"
    ).unwrap();

    pub static ref LEGAL_LOT_OR_PARCEL: Regex = Regex::new(
        r"(?i)\b((?:LOT|PARCEL)\s+[0-9]+(?s:.){20,1500}?)(?:\bAPN\b|\bAP#|\bAssessor|\bEXCEPTING|\bSituated|$)"
    ).unwrap();

    pub static ref LEGAL_FOLLOWING_DESCRIBED: Regex = Regex::new(
        r"(?i)the\s+following\s+described\s+real\s+property(?:[^:]{0,200}:)?\s*((?s:.){30,2000}?)(?:\bAPN\b|\bAP#|\bAssessor|\bEXCEPTING|\bSituated|\bThis\s+conveyance)"
    ).unwrap();

    pub static ref LEGAL_REAL_PROPERTY: Regex = Regex::new(
        r"(?i)real\s+property[:\s]+((?s:.){30,2000}?)(?:\bAPN\b|\bAP#|\bAssessor|\bEXCEPTING|\bSituated|\blocated)"
    ).unwrap();

    pub static ref RECEIPT_ACKNOWLEDGED: Regex = Regex::new(
        r"(?i)receipt\s+of\s+which\s+is\s+hereby\s+acknowledged"
    ).unwrap();

    /// Markers that close a positional legal description capture.
    pub static ref LEGAL_END_MARKERS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)(?:\bAPN|\bAP#)[:.\s]*[0-9]").unwrap(), "APN"),
        (Regex::new(r"(?i)Situated\s+in").unwrap(), "Situated"),
        (Regex::new(r"(?i)EXCEPTING").unwrap(), "EXCEPTING"),
        (Regex::new(r"(?i)BEARING\s+ASSESSOR").unwrap(), "BEARING"),
    ];

    pub static ref GRANT_CLAUSE_PREFIX: Regex = Regex::new(
        r"(?i)hereby\s+GRANTS?(?:\(S\))?[^:]*:\s*"
    ).unwrap();

    // Recording information
    pub static ref RECORDING_DATE: Regex = Regex::new(
        r"(?i)\b(?:Recorded(?:\s+on)?|Recording\s+Date)[:\s]*([0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4})\b"
    ).unwrap();

    pub static ref BOOK_PAGE_DATE: Regex = Regex::new(
        r"(?i)\bBook\s+[0-9]+\s+Page\s+[0-9]+\s+on\s+([0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4})\b"
    ).unwrap();
}
