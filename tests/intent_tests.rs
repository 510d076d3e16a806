use jira_helper::intent::{extract_task_title, Intent, IntentClassifier};
use jira_helper::tasks::mock::seed_tasks;
use chrono::Utc;

fn classify(query: &str) -> Intent {
    IntentClassifier::default().classify(query, &seed_tasks(Utc::now()))
}

#[test]
fn test_create_wins_over_priority() {
    assert_eq!(
        classify("create task: Fix urgent bug"),
        Intent::CreateTask { title: Some("Fix urgent bug".into()) }
    );
}

#[test]
fn test_create_without_title() {
    assert_eq!(classify("create a summary"), Intent::CreateTask { title: None });
}

#[test]
fn test_status_intents() {
    assert_eq!(classify("What tasks are in progress?"), Intent::InProgress);
    assert_eq!(classify("Show me my todo list"), Intent::ToDo);
    assert_eq!(classify("What is done?"), Intent::Done);
    assert_eq!(classify("give me a summary"), Intent::Summary);
}

#[test]
fn test_weekly_analytics_keeps_assignee() {
    assert_eq!(
        classify("average resolved per week for user1"),
        Intent::WeeklyAnalytics { assignee: Some("user1@example.com".into()) }
    );
    assert_eq!(
        classify("weekly resolved count"),
        Intent::WeeklyAnalytics { assignee: None }
    );
}

#[test]
fn test_assignee_lookup_by_full_identity_and_local_part() {
    assert_eq!(
        classify("show tasks for user2@example.com"),
        Intent::AssigneeLookup { assignee: "user2@example.com".into() }
    );
    assert_eq!(
        classify("anything for user2"),
        Intent::AssigneeLookup { assignee: "user2@example.com".into() }
    );
}

#[test]
fn test_configured_assignee_without_tasks() {
    let classifier = IntentClassifier::new(vec!["carol@example.com".into()]);
    assert_eq!(
        classifier.classify("what about carol", &[]),
        Intent::AssigneeLookup { assignee: "carol@example.com".into() }
    );
}

#[test]
fn test_workload_priority_help() {
    assert_eq!(classify("workload distribution"), Intent::Workload);
    assert_eq!(classify("What is urgent?"), Intent::Priority);
    assert_eq!(classify("help"), Intent::Help);
    assert_eq!(classify("anything interesting?"), Intent::Help);
}

#[test]
fn test_search_fallback_and_unknown() {
    assert_eq!(classify("navigation"), Intent::Search { term: "navigation".into() });
    assert_eq!(classify("xyzzy"), Intent::Unknown { query: "xyzzy".into() });
}

#[test]
fn test_blank_queries_are_unknown() {
    for q in ["", "   ", "\n\t"] {
        assert!(
            matches!(classify(q), Intent::Unknown { .. }),
            "blank query {:?} should not reach search",
            q
        );
    }
}

#[test]
fn test_title_extraction_trims() {
    for title in ["Fix login bug", "Write docs for v2", "  padded title  ", "Añadir traducción"] {
        let query = format!("create task: {title}");
        assert_eq!(extract_task_title(&query).as_deref(), Some(title.trim()), "query {:?}", query);
    }

    assert_eq!(extract_task_title("add task  Write tests  ").as_deref(), Some("Write tests"));
    assert_eq!(extract_task_title("new task: Ship it").as_deref(), Some("Ship it"));
    assert_eq!(extract_task_title("create: Plan sprint").as_deref(), Some("Plan sprint"));
    assert_eq!(extract_task_title("create task:   "), None);
    assert_eq!(extract_task_title("please create something"), None);
}

#[test]
fn test_intent_tags() {
    assert_eq!(Intent::WeeklyAnalytics { assignee: None }.tag(), "weekly_analytics");
    assert_eq!(classify("xyzzy").tag(), "unknown");
}

fn similar_names() -> Vec<jira_helper::Task> {
    use jira_helper::TaskStatus;
    vec![
        jira_helper::Task::new("J-1", "Alpha", TaskStatus::ToDo).with_assignee("user1@example.com"),
        jira_helper::Task::new("J-2", "Beta", TaskStatus::Done).with_assignee("user10@example.com"),
        jira_helper::Task::new("J-3", "Gamma", TaskStatus::ToDo).with_assignee("Ed"),
    ]
}

#[test]
fn test_assignee_prefix_is_not_a_match() {
    let classifier = IntentClassifier::default();
    let tasks = similar_names();

    assert_eq!(
        classifier.classify("show tasks for user10", &tasks),
        Intent::AssigneeLookup { assignee: "user10@example.com".into() }
    );
    assert_eq!(
        classifier.classify("show tasks for user1", &tasks),
        Intent::AssigneeLookup { assignee: "user1@example.com".into() }
    );
    assert_eq!(
        classifier.classify("weekly resolved for user10", &tasks),
        Intent::WeeklyAnalytics { assignee: Some("user10@example.com".into()) }
    );
    assert_eq!(
        classifier.classify("show tasks for user10@example.com", &tasks),
        Intent::AssigneeLookup { assignee: "user10@example.com".into() }
    );
}

#[test]
fn test_short_name_inside_word_is_not_a_match() {
    let classifier = IntentClassifier::default();
    let tasks = similar_names();

    assert!(
        !matches!(classifier.classify("fix bed", &tasks), Intent::AssigneeLookup { .. }),
        "\"Ed\" must not match inside \"bed\""
    );
    assert_eq!(
        classifier.classify("what is Ed doing", &tasks),
        Intent::AssigneeLookup { assignee: "Ed".into() }
    );
}
