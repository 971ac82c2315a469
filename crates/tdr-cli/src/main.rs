use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tdr_cli::commands::report::{self, ReportOptions};
use tdr_cli::{Cli, default_config_path};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the report
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let today = Local::now().date_naive();
    let date = report::parse_date(cli.date.as_deref(), today)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path().context("cannot find executable path")?,
    };

    let options = ReportOptions {
        date,
        project: cli.project,
        language: cli.lang,
        json: cli.json,
    };

    let mut stdout = std::io::stdout().lock();
    report::run(&mut stdout, &config_path, &options)?;

    Ok(())
}
