use chrono::{DateTime, Duration, Utc};

use super::types::{Priority, Task, TaskStatus};

/// Demo data served when Jira is not configured or unreachable.
/// Dates are relative to `now` so the weekly analytics have something to show.
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let days = Duration::days;

    let mut login = Task::new("JIRA-1", "Implement login page", TaskStatus::InProgress)
        .with_assignee("user1@example.com")
        .with_description("Create a responsive login page with email and password fields")
        .with_priority(Priority::High);
    login.created_date = Some(now - days(12));
    login.start_date = Some(now - days(9));
    login.due_date = Some(now + days(5));

    let mut nav = Task::new("JIRA-2", "Fix navigation bug", TaskStatus::ToDo)
        .with_assignee("user2@example.com")
        .with_description("Menu doesn't appear correctly on mobile devices")
        .with_priority(Priority::Medium);
    nav.created_date = Some(now - days(8));

    let mut docs = Task::new("JIRA-3", "Update documentation", TaskStatus::Done)
        .with_assignee("user1@example.com")
        .with_description("Add API documentation for the new endpoints")
        .with_priority(Priority::Low)
        .resolved_at(now - days(3));
    docs.created_date = Some(now - days(20));
    docs.start_date = Some(now - days(10));

    let mut widget = Task::new("JIRA-4", "Create dashboard widget", TaskStatus::ToDo)
        .with_assignee("user2@example.com")
        .with_description("Design and implement dashboard widgets for data visualization")
        .with_priority(Priority::Medium);
    widget.created_date = Some(now - days(6));

    let mut auth = Task::new("JIRA-5", "Fix login authentication", TaskStatus::InProgress)
        .with_assignee("user1@example.com")
        .with_description("Users unable to login with valid credentials")
        .with_priority(Priority::Highest);
    auth.created_date = Some(now - days(4));
    auth.start_date = Some(now - days(2));

    let mut ci = Task::new("JIRA-6", "Set up CI pipeline", TaskStatus::Done)
        .with_assignee("user2@example.com")
        .with_description("Run the test suite on every pull request")
        .with_priority(Priority::Medium)
        .resolved_at(now - days(10));
    ci.created_date = Some(now - days(25));

    for task in [&mut login, &mut nav, &mut docs, &mut widget, &mut auth, &mut ci] {
        task.updated_date = task.resolved_date.or(task.start_date).or(task.created_date);
    }

    vec![login, nav, docs, widget, auth, ci]
}
