//! Deed command - preview the trust transfer deed for a record.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde_json::json;

use deedscan_core::TrustTransferDeed;

use super::{TrustArgs, source};

/// Arguments for the deed command.
#[derive(Args)]
pub struct DeedArgs {
    /// Extracted record (.json) or a deed to extract from (.txt, .pdf)
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    trust: TrustArgs,

    /// How the grantor holds title, e.g. "Married Woman" (default from config)
    #[arg(long)]
    vesting: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the deed blocks as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Refuse to render while a required field is empty
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: DeedArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let mut record = source::read_record(&args.input, &config)?;
    args.trust.apply(&mut record);

    let mut deed = TrustTransferDeed::from_config(&record, &config.deed);
    if let Some(vesting) = &args.vesting {
        deed = deed.with_vesting(vesting.as_str());
    }

    if args.strict {
        deed.ensure_complete()?;
    }

    let missing = deed.missing_fields();
    if !missing.is_empty() {
        eprintln!(
            "{} Blank fields: {}",
            style("!").yellow(),
            missing.join(", ")
        );
    }

    let rendered = if args.json {
        serde_json::to_string_pretty(&json!({
            "recordingRequestedBy": deed.recording_requested_by(),
            "mailTo": deed.mail_to_lines(),
            "parcelNumber": record.parcel_number,
            "documentaryTransferTax": deed.documentary_transfer_tax(),
            "grantingClause": deed.granting_clause(),
            "legalDescription": record.legal_description,
            "commonlyKnownAs": deed.commonly_known_as(),
            "mailTaxStatementsTo": deed.mail_tax_statements_lines(),
            "missingFields": missing,
        }))?
    } else {
        deed.render_text()
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Deed written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}
