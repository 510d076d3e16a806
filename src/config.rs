use std::str::FromStr;
use std::time::Duration;

use crate::analytics::MAX_WEEKS;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub server: String,
    pub username: String,
    pub api_token: String,
    pub project_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Root of a llama.cpp-compatible server, e.g. `http://localhost:8080`.
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub cors_origin: String,
    /// `None` when any of the credentials is missing; mock data is served.
    pub jira: Option<JiraConfig>,
    /// `None` disables the generative backend entirely.
    pub llm: Option<LlmConfig>,
    pub known_assignees: Vec<String>,
    pub analytics_weeks: u32,
    /// Used as the project filter for JQL even when Jira itself is offline.
    pub project_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            cors_origin: "http://localhost:3000".to_string(),
            jira: None,
            llm: None,
            known_assignees: Vec::new(),
            analytics_weeks: 4,
            project_key: None,
        }
    }
}

impl AppConfig {
    /// Reads the process environment (plus `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let project_key = get("JIRA_PROJECT_KEY");

        let jira = match (get("JIRA_SERVER"), get("JIRA_USERNAME"), get("JIRA_API_TOKEN")) {
            (Some(server), Some(username), Some(api_token)) => Some(JiraConfig {
                server: server.trim_end_matches('/').to_string(),
                username,
                api_token,
                project_key: project_key.clone(),
                timeout: Duration::from_millis(parse_or(&get, "JIRA_TIMEOUT_MS", 5_000)?),
            }),
            _ => None,
        };

        let llm = match get("LLM_BASE_URL") {
            Some(base_url) => Some(LlmConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_millis(parse_or(&get, "LLM_TIMEOUT_MS", 2_000)?),
                max_tokens: parse_or(&get, "LLM_MAX_TOKENS", 512)?,
                temperature: parse_or(&get, "LLM_TEMPERATURE", 0.7)?,
            }),
            None => None,
        };

        let known_assignees = get("KNOWN_ASSIGNEES")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let analytics_weeks = parse_or(&get, "ANALYTICS_WEEKS", defaults.analytics_weeks)?;
        if analytics_weeks == 0 || analytics_weeks > MAX_WEEKS {
            return Err(ConfigError::Invalid {
                key: "ANALYTICS_WEEKS",
                value: analytics_weeks.to_string(),
            });
        }

        Ok(Self {
            bind_addr: get("APP_BIND_ADDR").unwrap_or(defaults.bind_addr),
            cors_origin: get("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            jira,
            llm,
            known_assignees,
            analytics_weeks,
            project_key,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
