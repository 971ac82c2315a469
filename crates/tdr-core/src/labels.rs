//! Fixed report text for each supported output language.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Every fixed string the report renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLabels {
    pub title: &'static str,
    pub summary_heading: &'static str,
    pub total_hours: &'static str,
    pub projects_heading: &'static str,
    /// Project name used for entries without a resolved project.
    pub uncategorized: &'static str,
    /// Task name used for entries without a description.
    pub untitled_task: &'static str,
}

impl ReportLabels {
    pub const JAPANESE: Self = Self {
        title: "日報",
        summary_heading: "サマリー",
        total_hours: "稼働時間合計",
        projects_heading: "プロジェクト別作業時間",
        uncategorized: "その他",
        untitled_task: "無題のタスク",
    };

    pub const ENGLISH: Self = Self {
        title: "Daily Report",
        summary_heading: "Summary",
        total_hours: "Total hours",
        projects_heading: "Hours by project",
        uncategorized: "Uncategorized",
        untitled_task: "Untitled task",
    };
}

impl Default for ReportLabels {
    fn default() -> Self {
        Language::default().labels()
    }
}

/// Output language of the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Japanese,
    English,
}

impl Language {
    pub const fn labels(self) -> ReportLabels {
        match self {
            Self::Japanese => ReportLabels::JAPANESE,
            Self::English => ReportLabels::ENGLISH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Japanese => "ja",
            Self::English => "en",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "japanese" => Ok(Self::Japanese),
            "en" | "english" => Ok(Self::English),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Error type for unsupported language codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language: {0} (expected 'ja' or 'en')")]
pub struct UnknownLanguage(String);
