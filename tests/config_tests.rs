use std::collections::HashMap;
use std::time::Duration;

use jira_helper::error::ConfigError;
use jira_helper::AppConfig;

fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = load(&[]).unwrap();
    assert_eq!(config.bind_addr, "127.0.0.1:8000");
    assert_eq!(config.cors_origin, "http://localhost:3000");
    assert_eq!(config.analytics_weeks, 4);
    assert!(config.jira.is_none());
    assert!(config.llm.is_none());
    assert!(config.known_assignees.is_empty());
}

#[test]
fn test_jira_needs_all_credentials() {
    let partial = load(&[("JIRA_SERVER", "https://acme.atlassian.net"), ("JIRA_USERNAME", "bot")]).unwrap();
    assert!(partial.jira.is_none());

    let full = load(&[
        ("JIRA_SERVER", "https://acme.atlassian.net/"),
        ("JIRA_USERNAME", "bot"),
        ("JIRA_API_TOKEN", "secret"),
        ("JIRA_PROJECT_KEY", "ABC"),
        ("JIRA_TIMEOUT_MS", "1500"),
    ])
    .unwrap();
    let jira = full.jira.unwrap();
    assert_eq!(jira.server, "https://acme.atlassian.net");
    assert_eq!(jira.project_key.as_deref(), Some("ABC"));
    assert_eq!(jira.timeout, Duration::from_millis(1500));
    assert_eq!(full.project_key.as_deref(), Some("ABC"));
}

#[test]
fn test_llm_settings() {
    let config = load(&[
        ("LLM_BASE_URL", "http://localhost:8080/"),
        ("LLM_TEMPERATURE", "0.2"),
    ])
    .unwrap();
    let llm = config.llm.unwrap();
    assert_eq!(llm.base_url, "http://localhost:8080");
    assert_eq!(llm.timeout, Duration::from_millis(2_000));
    assert_eq!(llm.max_tokens, 512);
    assert_eq!(llm.temperature, 0.2);
}

#[test]
fn test_known_assignees_and_weeks() {
    let config = load(&[
        ("KNOWN_ASSIGNEES", " alice@example.com, ,bob@example.com "),
        ("ANALYTICS_WEEKS", "8"),
        ("APP_BIND_ADDR", "0.0.0.0:9000"),
    ])
    .unwrap();
    assert_eq!(config.known_assignees, vec!["alice@example.com", "bob@example.com"]);
    assert_eq!(config.analytics_weeks, 8);
    assert_eq!(config.bind_addr, "0.0.0.0:9000");
}

#[test]
fn test_invalid_number_is_rejected() {
    match load(&[("ANALYTICS_WEEKS", "many")]) {
        Err(ConfigError::Invalid { key, value }) => {
            assert_eq!(key, "ANALYTICS_WEEKS");
            assert_eq!(value, "many");
        }
        other => panic!("expected invalid config, got {:?}", other),
    }
}

#[test]
fn test_analytics_window_is_bounded() {
    for bad in ["0", "53", "60"] {
        match load(&[("ANALYTICS_WEEKS", bad)]) {
            Err(ConfigError::Invalid { key, value }) => {
                assert_eq!(key, "ANALYTICS_WEEKS");
                assert_eq!(value, bad);
            }
            other => panic!("ANALYTICS_WEEKS={} should be rejected, got {:?}", bad, other),
        }
    }
    assert_eq!(load(&[("ANALYTICS_WEEKS", "52")]).unwrap().analytics_weeks, 52);
}
