//! Report command: fetch one day of entries and print the daily report.
//!
//! The pipeline is strictly sequential: load config, fetch entries from
//! Toggl, reject an empty day, render, write. Nothing is retried.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tdr_core::{Language, TimeEntry, generate_report, summarize};
use tdr_toggl::{Client, TogglError};
use thiserror::Error;

use crate::Config;

/// Date format accepted by `--date` and used in the report header.
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = "YYYY-MM-DD".len();

/// Errors that abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The config file could not be read or parsed.
    #[error("failed to load config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },
    /// No API token in the environment or the config file.
    #[error(
        "API token not found. Set TOGGL_API_TOKEN environment variable or configure api_token in {}",
        .path.display()
    )]
    MissingToken { path: PathBuf },
    /// `--date` was not a valid YYYY-MM-DD date.
    #[error("invalid date format: {value}. Use YYYY-MM-DD")]
    InvalidDate { value: String },
    /// Talking to the Toggl API failed.
    #[error("failed to fetch time entries: {0}")]
    Fetch(#[from] TogglError),
    /// The API returned no entries for the day.
    #[error("no time entries found for {date}")]
    NoEntries { date: NaiveDate },
    /// The async runtime could not be started.
    #[error("failed to initialize async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Report data could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// What to report on and how to print it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub date: NaiveDate,
    /// Case-insensitive project-name substring.
    pub project: Option<String>,
    pub language: Language,
    pub json: bool,
}

/// Parses `--date`, falling back to `today` when it is missing or empty.
///
/// Month and day must be zero-padded.
pub fn parse_date(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ReportError> {
    let Some(trimmed) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(today);
    };
    let invalid = || ReportError::InvalidDate {
        value: trimmed.to_string(),
    };

    if trimmed.len() != DATE_LEN {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}

/// Loads the config and checks that an API token is present.
pub fn load_config(path: &Path) -> Result<Config, ReportError> {
    let config = Config::load_from(path).map_err(|source| ReportError::Config {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    tracing::debug!(?config, path = %path.display(), "loaded configuration");

    ensure_token(&config, path)?;
    if let Some(date_format) = &config.date_format {
        tracing::debug!(%date_format, "date_format is reserved and ignored");
    }
    Ok(config)
}

fn ensure_token(config: &Config, path: &Path) -> Result<(), ReportError> {
    if config.api_token().is_none() {
        return Err(ReportError::MissingToken {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Fetches the entries of `date` from Toggl on a current-thread runtime.
pub fn fetch_entries(config: &Config, date: NaiveDate) -> Result<Vec<TimeEntry>, ReportError> {
    let token = config.api_token().unwrap_or_default();
    let mut client = Client::new(token)?;
    if let Some(api_url) = config.api_url() {
        client = client.with_base_url(api_url);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ReportError::Runtime)?;
    let entries =
        runtime.block_on(client.fetch_time_entries(date, config.workspace_id()))?;
    Ok(entries)
}

/// Renders the report for already-fetched entries.
///
/// Zero entries is an error here. Entries that all fall outside the project
/// filter still produce a report, with zero hours.
pub fn build_report(entries: &[TimeEntry], options: &ReportOptions) -> Result<String, ReportError> {
    if entries.is_empty() {
        return Err(ReportError::NoEntries { date: options.date });
    }

    let labels = options.language.labels();
    let filter = options.project.as_deref();

    if options.json {
        let summary = summarize(entries, options.date, filter, &labels);
        let mut output = serde_json::to_string_pretty(&summary)?;
        output.push('\n');
        return Ok(output);
    }

    Ok(generate_report(entries, options.date, filter, &labels))
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(
    writer: &mut W,
    config_path: &Path,
    options: &ReportOptions,
) -> Result<(), ReportError> {
    let config = load_config(config_path)?;
    let entries = fetch_entries(&config, options.date)?;
    let report = build_report(&entries, options)?;

    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(())
}
