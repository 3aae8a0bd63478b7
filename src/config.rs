use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub log_filter: Option<String>,
    pub jira: Option<JiraConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JiraConfig {
    /// Site root, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Path the tracker is mounted under, e.g. `/jira`. Empty for cloud sites.
    #[serde(default)]
    pub context_path: String,
    /// Base of the generic REST API. Defaults to `{context_path}/rest/api/2`.
    pub rest_base_path: Option<String>,
    pub email: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl JiraConfig {
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.email, &self.api_token) {
            (Some(email), Some(token)) => Some((email.as_str(), token.as_str())),
            _ => None,
        }
    }
}

impl AppConfig {
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn require_jira(&self) -> Result<&JiraConfig> {
        self.jira.as_ref().with_context(|| {
            format!(
                "No [jira] section configured. Add one to {}",
                config_path().display()
            )
        })
    }
}

pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jira-agile")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
