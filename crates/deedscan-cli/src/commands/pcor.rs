//! PCOR command - preview the preliminary change of ownership report values.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use serde_json::json;

use deedscan_core::PcorForm;

use super::{TrustArgs, source};

/// Arguments for the pcor command.
#[derive(Args)]
pub struct PcorArgs {
    /// Extracted record (.json) or a deed to extract from (.txt, .pdf)
    #[arg(required = true)]
    input: PathBuf,

    #[command(flatten)]
    trust: TrustArgs,

    /// Transfer date, YYYY-MM-DD (default: today)
    #[arg(long)]
    transfer_date: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit field values and checkboxes as JSON
    #[arg(long)]
    json: bool,

    /// Refuse to render while a required field is empty
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: PcorArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let mut record = source::read_record(&args.input, &config)?;
    args.trust.apply(&mut record);

    let transfer_date = args
        .transfer_date
        .unwrap_or_else(|| Local::now().date_naive());
    let form = PcorForm::from_record(&record, transfer_date);

    if args.strict {
        form.ensure_complete()?;
    }

    let missing = form.missing_fields();
    if !missing.is_empty() {
        eprintln!(
            "{} Blank fields: {}",
            style("!").yellow(),
            missing.join(", ")
        );
    }

    let rendered = if args.json {
        let fields: serde_json::Map<String, serde_json::Value> = form
            .text_field_values()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.into()))
            .collect();
        let checked: Vec<_> = form.checkboxes().iter().map(|cb| cb.index).collect();

        serde_json::to_string_pretty(&json!({
            "county": form.county(),
            "template": form.template_file(),
            "fields": fields,
            "checkedBoxes": checked,
            "missingFields": missing,
        }))?
    } else {
        form.render_text()
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} PCOR values written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}
