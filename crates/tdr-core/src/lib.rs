//! Core domain logic for the Toggl daily report.
//!
//! This crate contains the fundamental types and logic for:
//! - Time entries as returned by the time-tracking service
//! - Report generation: filtering, grouping by project and task, ordering
//! - Report labels for the supported output languages

pub mod entry;
pub mod labels;
pub mod report;

pub use entry::TimeEntry;
pub use labels::{Language, ReportLabels, UnknownLanguage};
pub use report::{DailySummary, ProjectSummary, TaskSummary, generate_report, render, summarize};
