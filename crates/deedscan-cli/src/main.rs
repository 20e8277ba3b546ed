//! CLI application for California deed extraction and trust transfer paperwork.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, deed, extract, pcor};

/// Deed OCR - Extract parcel, grantee and legal description data from recorded deeds
#[derive(Parser)]
#[command(name = "deedscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a record from a single deed (OCR text or PDF)
    Extract(extract::ExtractArgs),

    /// Extract records from many deeds
    Batch(batch::BatchArgs),

    /// Preview a trust transfer deed for a record
    Deed(deed::DeedArgs),

    /// Preview the PCOR form values for a record
    Pcor(pcor::PcorArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Records go to stdout, so logs stay on stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Deed(args) => deed::run(args, cli.config.as_deref()).await,
        Commands::Pcor(args) => pcor::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
