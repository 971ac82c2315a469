//! Time entry model.

use serde::{Deserialize, Serialize};

/// Seconds in one hour, used for every duration conversion.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// A single tracked time entry with its project name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    /// Task description. Empty when the entry was left untitled.
    pub description: String,
    /// Duration in seconds. Running entries report a negative value upstream;
    /// it is used as-is.
    pub duration: i64,
    pub project_id: Option<i64>,
    /// Resolved project name. Empty when the entry has no project or the
    /// name could not be resolved.
    pub project_name: String,
}

impl TimeEntry {
    /// Duration converted to hours.
    #[allow(clippy::cast_precision_loss)]
    pub fn hours(&self) -> f64 {
        self.duration as f64 / SECONDS_PER_HOUR
    }
}
