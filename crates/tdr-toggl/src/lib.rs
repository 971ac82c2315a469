//! Toggl Track API client for the daily report.
//!
//! Fetches one day of time entries through the v9 REST API and resolves
//! each entry's project id to a project name. Project-name lookup is allowed
//! to fail: entries are then returned without names.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tdr_core::TimeEntry;
use thiserror::Error;

/// Request timeout applied to every API call.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_BASE_URL: &str = "https://api.track.toggl.com/api/v9";
/// Toggl expects the token as the basic-auth user and this literal as password.
const BASIC_AUTH_PASSWORD: &str = "api_token";

/// Toggl client errors.
#[derive(Debug, Error)]
pub enum TogglError {
    /// The provided API token was invalid.
    #[error("invalid API token: {reason}")]
    InvalidApiToken { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// The API rejected the credentials.
    #[error("authentication failed with status {status}; check the API token")]
    Authentication { status: StatusCode },
    /// HTTP request could not complete.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// API returned a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// A time entry as returned by `GET /me/time_entries`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTimeEntry {
    pub id: i64,
    #[serde(default)]
    pub description: Option<String>,
    pub duration: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
}

/// A project as returned by `GET /workspaces/{id}/projects`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct Me {
    #[serde(default)]
    default_workspace_id: Option<i64>,
}

/// Outcome of the project-name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectNames {
    /// Project id to name.
    Resolved(HashMap<i64, String>),
    /// The lookup failed; entries keep empty project names.
    Unavailable { reason: String },
}

impl ProjectNames {
    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self::Resolved(projects.into_iter().map(|p| (p.id, p.name)).collect())
    }

    pub fn name(&self, project_id: i64) -> Option<&str> {
        match self {
            Self::Resolved(names) => names.get(&project_id).map(String::as_str),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Returns the UTC bounds of `date` as a half-open interval.
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start + chrono::Duration::days(1);
    (start, end)
}

/// Converts raw API entries into report entries, filling in project names.
pub fn attach_project_names(raw: Vec<RawTimeEntry>, names: &ProjectNames) -> Vec<TimeEntry> {
    raw.into_iter()
        .map(|entry| {
            let project_name = entry
                .project_id
                .and_then(|id| names.name(id))
                .unwrap_or_default()
                .to_string();
            TimeEntry {
                id: entry.id,
                description: entry.description.unwrap_or_default(),
                duration: entry.duration,
                project_id: entry.project_id,
                project_name,
            }
        })
        .collect()
}

/// Maps a response status to an error, passing the body through on success.
fn check_status(status: StatusCode, body: String) -> Result<String, TogglError> {
    if status.is_success() {
        return Ok(body);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(TogglError::Authentication { status });
    }
    Err(TogglError::Status {
        status,
        body: body.trim().to_string(),
    })
}

/// Toggl Track API client.
pub struct Client {
    http: reqwest::Client,
    api_token: String,
    base_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the given API token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(api_token: impl Into<String>) -> Result<Self, TogglError> {
        let api_token = api_token.into();

        if api_token.is_empty() {
            return Err(TogglError::InvalidApiToken {
                reason: "API token cannot be empty",
            });
        }
        if api_token.trim().is_empty() {
            return Err(TogglError::InvalidApiToken {
                reason: "API token cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(TogglError::ClientBuild)?;

        Ok(Self {
            http,
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TogglError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "requesting");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.api_token, Some(BASIC_AUTH_PASSWORD))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let body = check_status(status, body)?;

        serde_json::from_str(&body).map_err(|err| TogglError::Decode(err.to_string()))
    }

    /// Looks up the default workspace of the authenticated user.
    pub async fn default_workspace_id(&self) -> Result<String, TogglError> {
        let me: Me = self.get_json("/me", &[]).await?;
        me.default_workspace_id
            .filter(|id| *id > 0)
            .map(|id| id.to_string())
            .ok_or_else(|| TogglError::Decode("missing default_workspace_id".to_string()))
    }

    /// Fetches the raw entries that started within the UTC day of `date`.
    pub async fn raw_time_entries(&self, date: NaiveDate) -> Result<Vec<RawTimeEntry>, TogglError> {
        let (start, end) = day_window(date);
        let query = [
            ("start_date", start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("end_date", end.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ];
        self.get_json("/me/time_entries", &query).await
    }

    /// Fetches every project of a workspace.
    pub async fn projects(&self, workspace_id: &str) -> Result<Vec<Project>, TogglError> {
        self.get_json(&format!("/workspaces/{workspace_id}/projects"), &[])
            .await
    }

    /// Resolves project names for a workspace without failing the caller.
    pub async fn project_names(&self, workspace_id: &str) -> ProjectNames {
        match self.projects(workspace_id).await {
            Ok(projects) => ProjectNames::from_projects(projects),
            Err(err) => ProjectNames::Unavailable {
                reason: err.to_string(),
            },
        }
    }

    /// Fetches the time entries of `date` with project names resolved.
    ///
    /// Without a `workspace_id` the user's default workspace is used. A failed
    /// project lookup is logged and the entries come back without names.
    pub async fn fetch_time_entries(
        &self,
        date: NaiveDate,
        workspace_id: Option<&str>,
    ) -> Result<Vec<TimeEntry>, TogglError> {
        let workspace_id = match workspace_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let id = self.default_workspace_id().await?;
                tracing::debug!(workspace_id = %id, "using default workspace");
                id
            }
        };

        let raw = self.raw_time_entries(date).await?;
        tracing::debug!(count = raw.len(), %date, "fetched time entries");
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let names = self.project_names(&workspace_id).await;
        if let ProjectNames::Unavailable { reason } = &names {
            tracing::warn!(%reason, "failed to get project names; continuing without them");
        }

        Ok(attach_project_names(raw, &names))
    }
}
