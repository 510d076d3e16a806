use std::time::Duration;

use jira_helper::config::JiraConfig;
use jira_helper::error::StoreError;
use jira_helper::services::jira::{is_issue_key, JiraTaskStore};
use jira_helper::TaskStore;

fn store() -> JiraTaskStore {
    JiraTaskStore::new(&JiraConfig {
        server: "http://127.0.0.1:9".into(),
        username: "bot".into(),
        api_token: "secret".into(),
        project_key: Some("ABC".into()),
        timeout: Duration::from_millis(200),
    })
}

#[test]
fn test_issue_key_format() {
    for ok in ["ABC-1", "jira-42", "A1_B-7", "10042"] {
        assert!(is_issue_key(ok), "{ok} should be accepted");
    }
    for bad in ["", "../myself", "ABC-1/comment", "ABC-", "-1", "ABC 1", "ABC-1?expand=all"] {
        assert!(!is_issue_key(bad), "{bad:?} should be rejected");
    }
}

#[tokio::test]
async fn test_malformed_id_never_reaches_jira() {
    // Port 9 is closed; reaching the network would surface as Http, not NotFound.
    match store().get_task("../myself").await {
        Err(StoreError::NotFound(id)) => assert_eq!(id, "../myself"),
        other => panic!("expected NotFound, got {:?}", other.map(|t| t.id)),
    }
}

#[test]
fn test_filter_jql_is_quoted_and_scoped() {
    let filter = jira_helper::tasks::TaskFilter {
        status: Some("In Progress".into()),
        assignee: Some("o\"brien".into()),
    };
    assert_eq!(
        store().filter_jql(&filter),
        "project = ABC AND status = \"In Progress\" AND assignee = \"o\\\"brien\" ORDER BY created DESC"
    );
}
