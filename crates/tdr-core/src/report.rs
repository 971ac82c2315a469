//! Daily report generation.
//!
//! Entries are filtered by an optional project-name substring, grouped by
//! project and then by task description, ordered by hours, and rendered as
//! Markdown-style text. Grouping goes through `BTreeMap` so the output never
//! depends on hash iteration order.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::entry::TimeEntry;
use crate::labels::ReportLabels;

/// Hours accumulated for one task within a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub name: String,
    pub hours: f64,
}

/// Hours accumulated for one project, with its tasks in report order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub total_hours: f64,
    pub tasks: Vec<TaskSummary>,
}

/// Filtered, grouped and ordered report data for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_hours: f64,
    pub projects: Vec<ProjectSummary>,
}

#[derive(Default)]
struct ProjectAccumulator<'a> {
    total_hours: f64,
    tasks: BTreeMap<&'a str, f64>,
}

// ========== Filtering ==========

/// Keeps entries whose project name contains `filter`, ignoring case.
///
/// A missing or empty filter keeps every entry. Entries without a project
/// name never match a non-empty filter.
pub fn filter_entries<'a>(entries: &'a [TimeEntry], filter: Option<&str>) -> Vec<&'a TimeEntry> {
    let needle = filter.map(str::to_lowercase).filter(|f| !f.is_empty());

    entries
        .iter()
        .filter(|entry| {
            needle
                .as_deref()
                .is_none_or(|needle| entry.project_name.to_lowercase().contains(needle))
        })
        .collect()
}

// ========== Ordering ==========

/// Hours descending, then name ascending.
fn by_hours_then_name(a: (&str, f64), b: (&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

// ========== Aggregation ==========

/// Builds the report data for `date` from `entries`.
pub fn summarize(
    entries: &[TimeEntry],
    date: NaiveDate,
    filter: Option<&str>,
    labels: &ReportLabels,
) -> DailySummary {
    let filtered = filter_entries(entries, filter);
    tracing::debug!(
        total = entries.len(),
        kept = filtered.len(),
        ?filter,
        "filtered time entries"
    );

    let mut groups: BTreeMap<&str, ProjectAccumulator<'_>> = BTreeMap::new();
    let mut total_hours = 0.0;

    for entry in filtered {
        let hours = entry.hours();
        let project_name = if entry.project_name.is_empty() {
            labels.uncategorized
        } else {
            entry.project_name.as_str()
        };
        let task_name = if entry.description.is_empty() {
            labels.untitled_task
        } else {
            entry.description.as_str()
        };

        let group = groups.entry(project_name).or_default();
        group.total_hours += hours;
        *group.tasks.entry(task_name).or_insert(0.0) += hours;
        total_hours += hours;
    }

    let mut projects: Vec<ProjectSummary> = groups
        .into_iter()
        .map(|(name, group)| {
            let mut tasks: Vec<TaskSummary> = group
                .tasks
                .into_iter()
                .map(|(name, hours)| TaskSummary {
                    name: name.to_string(),
                    hours,
                })
                .collect();
            tasks.sort_by(|a, b| {
                by_hours_then_name((a.name.as_str(), a.hours), (b.name.as_str(), b.hours))
            });

            ProjectSummary {
                name: name.to_string(),
                total_hours: group.total_hours,
                tasks,
            }
        })
        .collect();
    projects.sort_by(|a, b| {
        by_hours_then_name(
            (a.name.as_str(), a.total_hours),
            (b.name.as_str(), b.total_hours),
        )
    });

    DailySummary {
        date,
        total_hours,
        projects,
    }
}

// ========== Rendering ==========

struct RenderedReport<'a> {
    summary: &'a DailySummary,
    labels: &'a ReportLabels,
}

impl fmt::Display for RenderedReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { summary, labels } = self;

        writeln!(f, "# {} {}", labels.title, summary.date.format("%Y-%m-%d"))?;
        writeln!(f)?;
        writeln!(f, "## {}", labels.summary_heading)?;
        writeln!(f, "- {}: {:.2}h", labels.total_hours, summary.total_hours)?;
        writeln!(f)?;
        writeln!(f, "## {}", labels.projects_heading)?;
        writeln!(f)?;

        for project in &summary.projects {
            writeln!(f, "### {} ({:.2}h)", project.name, project.total_hours)?;
            for task in &project.tasks {
                writeln!(f, "- {}: {:.2}h", task.name, task.hours)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Renders report data as text.
pub fn render(summary: &DailySummary, labels: &ReportLabels) -> String {
    RenderedReport { summary, labels }.to_string()
}

/// Filters, groups and renders `entries` as the report for `date`.
pub fn generate_report(
    entries: &[TimeEntry],
    date: NaiveDate,
    filter: Option<&str>,
    labels: &ReportLabels,
) -> String {
    let summary = summarize(entries, date, filter, labels);
    render(&summary, labels)
}
