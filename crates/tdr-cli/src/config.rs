//! Configuration loading and management.
//!
//! Values come from a JSON file and from `TOGGL_*` environment variables.
//! Environment variables take precedence over the file unless they are blank.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Json};
use figment::{Figment, Provider};
use serde::{Deserialize, Deserializer};

/// File name of the config file looked up next to the executable.
pub const DEFAULT_CONFIG_FILE: &str = ".toggl-daily-report.json";

/// Prefix of the environment variables that override the config file.
const ENV_PREFIX: &str = "TOGGL_";
const ENV_KEYS: &[&str] = &["api_token", "workspace_id", "api_url"];

/// Application configuration.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Toggl API token (`TOGGL_API_TOKEN`).
    pub api_token: Option<String>,
    /// Workspace used for project lookup. The default workspace is used when unset.
    #[serde(deserialize_with = "string_or_number")]
    pub workspace_id: Option<String>,
    /// Reserved. Accepted for compatibility, not used when rendering.
    pub date_format: Option<String>,
    /// Overrides the Toggl API root.
    pub api_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("workspace_id", &self.workspace_id)
            .field("date_format", &self.date_format)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Loads configuration from `path` and the environment.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(path: &Path) -> Result<Self, figment::Error> {
        Self::extract(path, env_provider())
    }

    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    fn extract(path: &Path, env: impl Provider) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Json::file(path))
            .merge(env)
            .extract()
    }

    /// The API token, if set to something other than whitespace.
    pub fn api_token(&self) -> Option<&str> {
        non_blank(self.api_token.as_deref())
    }

    pub fn workspace_id(&self) -> Option<&str> {
        non_blank(self.workspace_id.as_deref())
    }

    pub fn api_url(&self) -> Option<&str> {
        non_blank(self.api_url.as_deref())
    }
}

/// `TOGGL_*` overrides, skipping variables that are set but blank.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).only(ENV_KEYS).filter(|key| {
        std::env::var(format!("{ENV_PREFIX}{key}")).is_ok_and(|value| !value.trim().is_empty())
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts workspace ids written either as JSON strings or integers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(i64),
    }

    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }),
    )
}

/// Returns the default config path: the config file next to the executable.
pub fn default_config_path() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(DEFAULT_CONFIG_FILE))
}
