mod error;
mod fetch;
mod model;
mod output;
mod parser;
mod settings;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use output::Format;
use parser::FailurePolicy;
use settings::Settings;

#[derive(Parser)]
#[command(name = "zsr_delays", about = "Current train positions and delays from the ŽSR status page")]
struct Cli {
    /// Status page to fetch (default: ŽSR train movement page)
    #[arg(short, long)]
    url: Option<String>,

    /// Parse a saved copy of the page instead of fetching it
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Leave out the CSV header row
    #[arg(long)]
    no_header: bool,

    /// Skip trains that cannot be parsed instead of failing the run
    #[arg(long)]
    skip_malformed: bool,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the records, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(url) = cli.url {
        settings.url = url;
    }
    if let Some(timeout) = cli.timeout {
        settings.timeout_secs = timeout;
    }

    let html = match &cli.input {
        Some(path) => fetch::read_saved(path)?,
        None => fetch::fetch_page(&settings).await?,
    };

    let policy = if cli.skip_malformed {
        FailurePolicy::Skip
    } else {
        FailurePolicy::Abort
    };
    // Extract everything before opening the output so a bad page writes nothing.
    let records = match parser::parse_document(&html, policy) {
        Ok(records) => records,
        Err(e) => {
            if e.is_structural() {
                error!("Status page markup does not have the expected train block layout");
            }
            return Err(anyhow::Error::new(e).context("Failed to extract trains"));
        }
    };

    let header = !cli.no_header;
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            output::write(BufWriter::new(file), &records, cli.format, header)?;
            info!("Wrote {} trains to {}", records.len(), path.display());
        }
        None => output::write(std::io::stdout().lock(), &records, cli.format, header)?,
    }

    Ok(())
}
