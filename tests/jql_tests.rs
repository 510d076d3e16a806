use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use jira_helper::error::LlmError;
use jira_helper::services::jql::{normalize_jql, parse_llm_response, query_suggestions, JqlConverter, JqlSource};
use jira_helper::services::llm::GenerativeBackend;

struct CannedBackend(Result<&'static str, ()>);

#[async_trait]
impl GenerativeBackend for CannedBackend {
    fn is_available(&self) -> bool {
        true
    }
    async fn generate(&self, prompt: &str, _context: &str) -> Result<String, LlmError> {
        assert!(prompt.contains("Convert this natural language query"));
        self.0.map(str::to_string).map_err(|_| LlmError::Empty)
    }
}

fn patterns(project: Option<&str>) -> JqlConverter {
    JqlConverter::new(None, project.map(str::to_string), Duration::from_secs(1))
}

#[test]
fn test_pattern_conversion_with_project() {
    let t = patterns(Some("ABC")).convert_with_patterns("unassigned high priority bugs created this week");
    assert_eq!(
        t.jql,
        "project = ABC AND created >= startOfWeek() AND assignee is EMPTY AND priority = High AND issuetype = Bug ORDER BY created DESC"
    );
    assert_eq!(
        t.explanation,
        "Pattern matching found: project, created, unassigned, priority, issuetype"
    );
    assert_eq!(t.source, JqlSource::Pattern);
}

#[test]
fn test_pattern_conversion_my_tasks() {
    let t = patterns(None).convert_with_patterns("my tasks in progress");
    assert_eq!(
        t.jql,
        "status = 'In Progress' AND assignee = currentUser() AND issuetype = Task ORDER BY created DESC"
    );
}

#[test]
fn test_pattern_conversion_nothing_found() {
    let t = patterns(None).convert_with_patterns("hello there");
    assert_eq!(t.jql, "ORDER BY created DESC");
    assert_eq!(t.explanation, "Pattern matching found: no specific patterns");
}

#[tokio::test]
async fn test_llm_translation_is_normalized() {
    let backend = Arc::new(CannedBackend(Ok(
        "JQL: project = ABC AND status = \"Done\"\nExplanation: Finished work",
    )));
    let converter = JqlConverter::new(Some(backend), Some("ABC".into()), Duration::from_secs(1));

    let t = converter.convert("what got finished", None).await;
    assert_eq!(t.jql, "project = ABC AND status = \"Done\" ORDER BY created DESC");
    assert_eq!(t.explanation, "Finished work");
    assert_eq!(t.source, JqlSource::Llm);
}

#[tokio::test]
async fn test_llm_failure_uses_patterns() {
    let converter = JqlConverter::new(Some(Arc::new(CannedBackend(Err(())))), None, Duration::from_secs(1));
    let t = converter.convert("open bugs", Some("triage")).await;
    assert_eq!(t.source, JqlSource::Pattern);
    assert_eq!(t.jql, "status = 'Open' AND issuetype = Bug ORDER BY created DESC");
}

#[tokio::test]
async fn test_llm_without_jql_uses_patterns() {
    let converter = JqlConverter::new(
        Some(Arc::new(CannedBackend(Ok("Sorry, I cannot help with that.")))),
        None,
        Duration::from_secs(1),
    );
    let t = converter.convert("done tasks", None).await;
    assert_eq!(t.source, JqlSource::Pattern);
}

#[test]
fn test_parse_llm_response() {
    let (jql, explanation) = parse_llm_response("JQL: status = Done\nExplanation: done work");
    assert_eq!(jql.as_deref(), Some("status = Done"));
    assert_eq!(explanation.as_deref(), Some("done work"));

    let (jql, explanation) = parse_llm_response("Here you go\nstatus = Done\n");
    assert_eq!(jql.as_deref(), Some("status = Done"));
    assert_eq!(explanation, None);

    let (jql, _) = parse_llm_response("nothing useful");
    assert_eq!(jql, None);
}

#[test]
fn test_normalize_jql() {
    assert_eq!(
        normalize_jql("  \"status   =  Done\"  ").as_deref(),
        Some("status = Done ORDER BY created DESC")
    );
    assert_eq!(
        normalize_jql("assignee is EMPTY order by updated ASC").as_deref(),
        Some("assignee is EMPTY order by updated ASC")
    );
    assert_eq!(normalize_jql("none"), None);
    assert_eq!(normalize_jql("   "), None);
}

#[test]
fn test_suggestions() {
    let suggestions = query_suggestions();
    assert_eq!(suggestions.len(), 5);
    assert!(suggestions.contains(&"Show unassigned items".to_string()));
}
