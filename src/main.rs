//! CLI entry point for the weather-station scraper.
//!
//! Provides subcommands for sweeping all configured stations over a date
//! range and for extracting a single page as a diagnostic aid.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use pws_scraper::{
    dates::{date_url_iter, station_id},
    extract::extract_from_html,
    fetch::{BasicClient, DEFAULT_TIMEOUT, fetch_text},
    output::write_summary,
    probe::{FirstDateProbe, ScanProbe},
    publish,
    summary::AggregateSummary,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::Instrument;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "pws_scraper")]
#[command(about = "Scrapes daily weather-station summaries into JSON files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every configured station over the date range and write JSON files
    Run {
        /// Newline-delimited list of station URL templates
        #[arg(short, long, default_value = "stations.txt")]
        stations: String,

        /// First date of the range (YYYY-MM-DD); defaults to yesterday
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Last date of the range (YYYY-MM-DD); defaults to yesterday
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Directory the JSON files are written to
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// Git checkout to commit and push the generated files into
        #[arg(long)]
        data_repo: Option<PathBuf>,

        /// Probe forward from the start date for the first date with data
        #[arg(long, default_value_t = false)]
        find_first_date: bool,

        /// Unit system the source pages are expected to use
        #[arg(long, default_value = "imperial")]
        units: String,
    },
    /// Extract a single page from a file or URL and print its daily summary
    Extract {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/pws_scraper.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("pws_scraper.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            stations,
            start_date,
            end_date,
            output_dir,
            data_repo,
            find_first_date,
            units,
        } => {
            run_sweep(
                &stations,
                start_date,
                end_date,
                &output_dir,
                data_repo,
                find_first_date,
                &units,
            )
            .await?;
        }
        Commands::Extract { source } => {
            let body = read_source(&source).await?;
            let daily = extract_from_html(&body);
            println!("{}", serde_json::to_string_pretty(&daily)?);
        }
    }

    Ok(())
}

/// Loads page content from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn read_source(source: &str) -> Result<String> {
    let body = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_text(&client, source, DEFAULT_TIMEOUT).await?
    } else {
        std::fs::read_to_string(source)?
    };
    Ok(body)
}

/// Processes every station sequentially, then publishes the generated files
/// if a data repository was configured.
///
/// Per-station failures are logged and skipped; only a publish failure makes
/// the whole run report an error.
async fn run_sweep(
    stations: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    output_dir: &Path,
    data_repo: Option<PathBuf>,
    find_first_date: bool,
    units: &str,
) -> Result<()> {
    let yesterday = Utc::now()
        .date_naive()
        .pred_opt()
        .context("calendar underflow computing yesterday")?;
    let start = start_date.unwrap_or(yesterday);
    let end = end_date.unwrap_or(yesterday);
    if start > end {
        bail!("start date {start} is after end date {end}");
    }

    info!(%start, %end, units, output_dir = %output_dir.display(), "Starting sweep");

    let station_list = std::fs::read_to_string(stations)
        .with_context(|| format!("reading station list from {stations}"))?;

    let client = BasicClient::new();
    let mut created_files: Vec<PathBuf> = Vec::new();

    for line in station_list.lines() {
        let template = line.trim();
        if template.is_empty() {
            continue;
        }

        let station = station_id(template).to_string();
        let station_span = tracing::info_span!("process_station", station = %station);

        match process_station(&client, template, start, end, find_first_date, output_dir)
            .instrument(station_span)
            .await
        {
            Ok(path) => created_files.push(path),
            Err(e) => error!(station = %station, error = %e, "Station failed, continuing"),
        }
    }

    if created_files.is_empty() {
        info!("No JSON files were created");
        return Ok(());
    }

    let Some(repo) = data_repo else {
        info!("No data repository configured, skipping publish");
        return Ok(());
    };

    let files: Vec<PathBuf> = created_files
        .iter()
        .map(|path| relative_to_repo(&repo, path))
        .collect();

    if let Err(e) = publish::commit_and_push(&repo, &files, end).await {
        error!(error = %e, "Failed to commit and push weather data");
        bail!("publishing generated files failed");
    }

    info!("Successfully committed and pushed weather data");
    Ok(())
}

/// Scrapes one station across the date range and writes its aggregate JSON.
///
/// Individual date failures are logged and skipped; the aggregate keeps
/// whatever the remaining dates contributed.
async fn process_station(
    client: &BasicClient,
    template: &str,
    start: NaiveDate,
    end: NaiveDate,
    find_first_date: bool,
    output_dir: &Path,
) -> Result<PathBuf> {
    let station = station_id(template).to_string();

    let start = if find_first_date {
        let probe = ScanProbe::new(BasicClient::new(), end);
        match probe.probe(template, start).await? {
            Some(first) => {
                info!(first_date = %first, "First date with data found");
                first
            }
            None => {
                warn!("Probe found no data, keeping configured start date");
                start
            }
        }
    } else {
        start
    };

    let mut aggregate = AggregateSummary::default();

    for (date, url) in date_url_iter(template, start, end) {
        info!(url = %url, "Scraping data");

        match fetch_text(client, &url, DEFAULT_TIMEOUT).await {
            Ok(body) => {
                let daily = extract_from_html(&body);
                info!(
                    date = %date,
                    max_temp = ?daily.max_temp,
                    min_temp = ?daily.min_temp,
                    max_gust = ?daily.max_gust,
                    sum_prec = ?daily.sum_prec,
                    "Extracted summary"
                );
                aggregate = aggregate.fold(&daily);
            }
            Err(e) => error!(url = %url, error = %e, "Fetch failed, skipping date"),
        }
    }

    info!(station = %station, "Saving summary statistics to JSON");
    write_summary(output_dir, &station, end, &aggregate)
}

/// Path to hand to `git add`: relative to the repository when the output
/// directory lives inside it, absolute otherwise.
fn relative_to_repo(repo: &Path, file: &Path) -> PathBuf {
    let repo_abs = repo.canonicalize().unwrap_or_else(|_| repo.to_path_buf());
    let file_abs = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
    file_abs
        .strip_prefix(&repo_abs)
        .map(Path::to_path_buf)
        .unwrap_or(file_abs)
}
