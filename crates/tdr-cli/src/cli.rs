//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;
use tdr_core::Language;

/// Toggl daily report generator.
///
/// Fetches one day of Toggl Track time entries and prints the hours spent
/// per project and task.
#[derive(Debug, Parser)]
#[command(name = "toggl-daily-report", version, about, long_about = None)]
pub struct Cli {
    /// Target date for the report (YYYY-MM-DD). Default: today.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Only include projects whose name contains this text (case-insensitive).
    #[arg(short, long)]
    pub project: Option<String>,

    /// Path to config file. Default: .toggl-daily-report.json next to the executable.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report language (ja, en).
    #[arg(long, default_value_t = Language::Japanese)]
    pub lang: Language,

    /// Print the report data as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "toggl-daily-report",
            "-d",
            "2024-03-01",
            "-p",
            "acme",
            "-c",
            "/tmp/report.json",
        ])
        .unwrap();

        assert_eq!(cli.date.as_deref(), Some("2024-03-01"));
        assert_eq!(cli.project.as_deref(), Some("acme"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/report.json")));
        assert_eq!(cli.lang, Language::Japanese);
        assert!(!cli.json);
    }

    #[test]
    fn test_lang_flag() {
        let cli = Cli::try_parse_from(["toggl-daily-report", "--lang", "en", "--json"]).unwrap();
        assert_eq!(cli.lang, Language::English);
        assert!(cli.json);
    }

    #[test]
    fn test_unknown_lang_is_rejected() {
        assert!(Cli::try_parse_from(["toggl-daily-report", "--lang", "fr"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
