use super::types::{Task, TaskStatus};

/// Naive case-insensitive substring match over title, description, id,
/// status and assignee. Relative order of `tasks` is preserved.
pub fn search<'a>(tasks: &'a [Task], term: &str) -> Vec<&'a Task> {
    let needle = term.to_lowercase();
    tasks.iter().filter(|t| matches_term(t, &needle)).collect()
}

/// `needle` must already be lowercase.
fn matches_term(task: &Task, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&task.title)
        || task.description.as_deref().is_some_and(contains)
        || contains(&task.id)
        || contains(task.status.as_str())
        || task.assignee.as_deref().is_some_and(contains)
}

/// Exact status filter; a pure predicate so re-filtering is a no-op.
pub fn filter_by_status<'a, I>(tasks: I, status: &TaskStatus) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().filter(|t| &t.status == status).collect()
}

pub fn filter_by_assignee<'a>(tasks: &'a [Task], assignee: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.assigned_to(assignee)).collect()
}
