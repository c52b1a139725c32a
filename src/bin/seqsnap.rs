use anyhow::{Context, Result};
use clap::Parser;
use seqsnap::{
    config::{
        DEFAULT_LIMIT, DEFAULT_MAX_LEN, DEFAULT_MIN_LEN, EntrezConfig, LengthRange, RunSettings,
        SettingsFile,
    },
    entrez::NcbiClient,
    pipeline::{self, RunOutcome},
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "seqsnap",
    version,
    about = "Fetch NCBI nucleotide records for a taxon and export a CSV report and a length chart"
)]
struct Cli {
    /// Contact address sent to NCBI with every request
    #[arg(long)]
    email: String,
    /// NCBI API key
    #[arg(long)]
    api_key: String,
    /// NCBI taxonomy ID
    #[arg(long)]
    taxid: String,
    #[arg(long, default_value_t = DEFAULT_MIN_LEN)]
    min_len: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    max_len: usize,
    /// Maximum number of records to fetch (0 fetches every match)
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
    /// Directory for the report and chart (default: current directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let file = match &cli.config {
        Some(path) => SettingsFile::from_json_file(path)?,
        None => SettingsFile::default(),
    };

    let mut entrez = EntrezConfig::new(cli.email, cli.api_key);
    file.apply_to_entrez(&mut entrez);

    let mut settings = RunSettings::new(cli.taxid.trim());
    settings.length_range = LengthRange::new(cli.min_len, cli.max_len)?;
    settings.limit = Some(cli.limit);
    file.apply_to_run(&mut settings);
    if let Some(out_dir) = cli.out_dir {
        settings.out_dir = out_dir;
    }

    let client = NcbiClient::new(entrez).context("Could not build HTTP client")?;
    match pipeline::run(&client, &settings)? {
        RunOutcome::Completed(summary) => {
            info!(
                fetched = summary.fetched,
                total = summary.total_count,
                report = %summary.csv_path.display(),
                "Done"
            );
        }
        RunOutcome::NoMatches | RunOutcome::SearchFailed => {
            info!("No records to download");
        }
    }
    Ok(())
}
