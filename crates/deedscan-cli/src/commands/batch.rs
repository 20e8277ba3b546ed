//! Batch extraction over many deed files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use deedscan_core::RuleBasedDeedParser;
use deedscan_core::models::config::PdfConfig;

use super::extract::{self, CSV_HEADER, DeedOutput, OutputFormat};
use super::source;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern, e.g. "deeds/*.txt"
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Stop at the first file whose text cannot be read
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| source::is_deed_source(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        check_output_clashes(output_dir, &files, args.format)?;
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = Arc::new(RuleBasedDeedParser::with_config(config.extraction.clone()));
    let pdf_config = Arc::new(config.pdf.clone());

    let mut outcomes = stream::iter(files.into_iter().map(|path| {
        let parser = Arc::clone(&parser);
        let pdf_config = Arc::clone(&pdf_config);
        tokio::task::spawn_blocking(move || extract_one(path, &parser, &pdf_config))
    }))
    .buffer_unordered(args.jobs.max(1));

    let mut results: Vec<(PathBuf, DeedOutput)> = Vec::new();
    while let Some(joined) = outcomes.next().await {
        let (path, output) = joined?;
        pb.inc(1);

        if !output.success {
            let error_msg = output.error.as_deref().unwrap_or("unknown error");
            if args.strict {
                error!("Failed to process {}: {}", path.display(), error_msg);
                anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
            }
        }
        results.push((path, output));
    }

    pb.finish_and_clear();
    results.sort_by(|a, b| a.0.cmp(&b.0));

    if let Some(output_dir) = &args.output_dir {
        for (path, output) in &results {
            let output_path = output_path_for(output_dir, path, args.format);
            fs::write(&output_path, extract::format_output(output, args.format, false)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|(_, output)| !output.success).collect();
    let incomplete = results
        .iter()
        .filter(|(_, output)| output.success && !output.result.missing_fields.is_empty())
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} incomplete), {} failed",
        style(results.len() - failed.len()).green(),
        style(incomplete).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (path, output) in &failed {
            println!(
                "  - {}: {}",
                path.display(),
                output.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn extract_one(path: PathBuf, parser: &RuleBasedDeedParser, pdf_config: &PdfConfig) -> (PathBuf, DeedOutput) {
    let output = extract::extract_file(&path, parser, pdf_config, false);
    (path, output)
}

/// `roy.pdf` becomes `roy.pdf.json`, so `roy.txt` next to it keeps its own output.
fn output_path_for(output_dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let name = input.file_name().and_then(|s| s.to_str()).unwrap_or("deed");
    output_dir.join(format!("{}.{}", name, format.extension()))
}

/// Same-named inputs from different directories would overwrite each other.
fn check_output_clashes(output_dir: &Path, files: &[PathBuf], format: OutputFormat) -> anyhow::Result<()> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    for input in files {
        let output_path = output_path_for(output_dir, input, format);
        if let Some(previous) = claimed.insert(output_path.clone(), input) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                output_path.display()
            );
        }
    }
    Ok(())
}

fn write_summary(path: &Path, results: &[(PathBuf, DeedOutput)]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(CSV_HEADER)?;

    for (_, output) in results {
        wtr.write_record(extract::csv_row(output))?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_keeps_source_extension() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            output_path_for(dir, Path::new("deeds/roy.pdf"), OutputFormat::Text),
            PathBuf::from("/tmp/out/roy.pdf.txt")
        );
        assert_eq!(
            output_path_for(dir, Path::new("deeds/roy.txt"), OutputFormat::Json),
            PathBuf::from("/tmp/out/roy.txt.json")
        );
    }

    #[test]
    fn test_same_stem_different_extension_does_not_clash() {
        let files = [PathBuf::from("deeds/roy.pdf"), PathBuf::from("deeds/roy.txt")];
        assert!(check_output_clashes(Path::new("out"), &files, OutputFormat::Json).is_ok());
    }

    #[test]
    fn test_same_name_in_two_directories_clashes() {
        let files = [PathBuf::from("2019/roy.txt"), PathBuf::from("2021/roy.txt")];
        let err = check_output_clashes(Path::new("out"), &files, OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("would both be written to"));
    }
}
