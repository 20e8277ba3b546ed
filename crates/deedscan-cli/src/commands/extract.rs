//! Extract command - pull a deed record from a single OCR dump or PDF.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info, warn};

use deedscan_core::deed::rules::{
    AddressExtractor, CityExtractor, CountyExtractor, ExtractionMatch, FieldExtractor,
    GranteeExtractor, LegalDescriptionExtractor, ParcelExtractor,
};
use deedscan_core::models::config::{ExtractionConfig, PdfConfig};
use deedscan_core::{DeedParser, ExtractionResult, RuleBasedDeedParser};

use super::source;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (OCR text or PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// List every candidate each rule found, not just the winner
    #[arg(long)]
    candidates: bool,

    /// Fail instead of emitting an empty record when no text can be read
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// One rule hit, as shown by `--candidates`.
#[derive(Debug, Serialize)]
pub struct Candidate {
    pub value: String,
    pub rule: &'static str,
    pub confidence: f32,
}

impl<T: ToString> From<ExtractionMatch<T>> for Candidate {
    fn from(found: ExtractionMatch<T>) -> Self {
        Self {
            value: found.value.to_string(),
            rule: found.rule,
            confidence: found.confidence,
        }
    }
}

/// Extraction outcome for one input file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeedOutput {
    pub success: bool,
    pub file: String,
    #[serde(flatten)]
    pub result: ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<BTreeMap<&'static str, Vec<Candidate>>>,
}

pub const CSV_HEADER: [&str; 14] = [
    "file",
    "success",
    "deed_type",
    "recording_date",
    "parcel_number",
    "grantor_name",
    "trustee_name",
    "property_address",
    "mailing_address",
    "city",
    "county",
    "legal_description",
    "processing_time_ms",
    "error",
];

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if !source::is_deed_source(&args.input) {
        anyhow::bail!("Unsupported file format: {}", source::extension(&args.input));
    }

    info!("Processing file: {}", args.input.display());

    let parser = RuleBasedDeedParser::with_config(config.extraction.clone());
    let output = extract_file(&args.input, &parser, &config.pdf, args.candidates);

    if args.strict {
        if let Some(error) = &output.error {
            anyhow::bail!("Could not read {}: {}", args.input.display(), error);
        }
    }

    if output.success && !output.result.missing_fields.is_empty() {
        eprintln!("{}", style("Fields to complete manually:").yellow());
        for field in &output.result.missing_fields {
            eprintln!("  - {}", field);
        }
    }

    let rendered = format_output(&output, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Extract one file. A source that yields no text produces the empty record
/// with `success: false`.
pub fn extract_file(
    path: &Path,
    parser: &RuleBasedDeedParser,
    pdf_config: &PdfConfig,
    with_candidates: bool,
) -> DeedOutput {
    let file = path.display().to_string();

    match source::read_deed_text(path, pdf_config) {
        Ok(text) => DeedOutput {
            success: true,
            candidates: with_candidates.then(|| collect_candidates(&text, parser.config())),
            result: parser.parse(&text),
            error: None,
            file,
        },
        Err(e) => {
            warn!("Could not read {}: {}; enter the deed information manually", file, e);
            DeedOutput {
                success: false,
                file,
                result: ExtractionResult::unreadable(),
                error: Some(e.to_string()),
                candidates: None,
            }
        }
    }
}

fn collect_candidates(text: &str, config: &ExtractionConfig) -> BTreeMap<&'static str, Vec<Candidate>> {
    fn list<T: ToString>(found: Vec<ExtractionMatch<T>>) -> Vec<Candidate> {
        found.into_iter().map(Candidate::from).collect()
    }

    BTreeMap::from([
        ("parcelNumber", list(ParcelExtractor::new().extract_all(text))),
        ("grantorName", list(GranteeExtractor::new().extract_all(text))),
        ("propertyAddress", list(AddressExtractor::new().extract_all(text))),
        ("city", list(CityExtractor::new().extract_all(text))),
        ("county", list(CountyExtractor::new().extract_all(text))),
        (
            "legalDescription",
            list(LegalDescriptionExtractor::from_config(config).extract_all(text)),
        ),
    ])
}

pub fn format_output(output: &DeedOutput, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(output)?),
        OutputFormat::Json => Ok(serde_json::to_string(output)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(CSV_HEADER)?;
            wtr.write_record(csv_row(output))?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format_text(output)),
    }
}

pub fn csv_row(output: &DeedOutput) -> [String; 14] {
    let result = &output.result;
    let record = &result.record;

    [
        output.file.clone(),
        output.success.to_string(),
        result.deed_type.display().to_string(),
        result.recording_date.map(|d| d.to_string()).unwrap_or_default(),
        record.parcel_number.clone(),
        record.grantor_name.clone(),
        record.trustee_name.clone(),
        record.property_address.clone(),
        record.mailing_address.clone(),
        record.city.clone(),
        record.county.to_string(),
        record.legal_description.clone(),
        result.processing_time_ms.to_string(),
        output.error.clone().unwrap_or_default(),
    ]
}

fn format_text(output: &DeedOutput) -> String {
    let result = &output.result;
    let record = &result.record;
    let mut out = String::new();

    out.push_str(&format!("File: {}\n", output.file));
    if let Some(error) = &output.error {
        out.push_str(&format!("Error: {}\n", error));
    }
    out.push_str(&format!("Deed type: {}\n", result.deed_type.display()));
    if let Some(date) = result.recording_date {
        out.push_str(&format!("Recorded: {}\n", date));
    }
    out.push('\n');

    out.push_str(&format!("APN: {}\n", record.parcel_number));
    out.push_str(&format!("Grantor: {}\n", record.grantor_name));
    out.push_str(&format!("Trustee: {}\n", record.trustee_name));
    out.push_str(&format!("Property address: {}\n", record.property_address));
    out.push_str(&format!("Mailing address: {}\n", record.mailing_address));
    out.push_str(&format!("City: {}\n", record.city));
    out.push_str(&format!("County: {}\n", record.county));
    out.push_str("Legal description:\n");
    out.push_str(&format!("  {}\n", record.legal_description));

    if !result.missing_fields.is_empty() {
        out.push_str(&format!("\nMissing: {}\n", result.missing_fields.join(", ")));
    }

    if let Some(candidates) = &output.candidates {
        out.push_str("\nCandidates:\n");
        for (field, found) in candidates {
            out.push_str(&format!("  {}:\n", field));
            for candidate in found {
                out.push_str(&format!(
                    "    - {} ({}, {:.2})\n",
                    candidate.value, candidate.rule, candidate.confidence
                ));
            }
        }
    }

    out
}
