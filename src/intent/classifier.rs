use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::types::Intent;
use crate::tasks::{search, Task};

const CREATE_KEYWORDS: &[&str] = &["create", "add", "new task"];
const IN_PROGRESS_KEYWORDS: &[&str] = &["in progress", "working on"];
const TO_DO_KEYWORDS: &[&str] = &["to do", "todo", "pending"];
const DONE_KEYWORDS: &[&str] = &["done", "completed", "finished"];
const SUMMARY_KEYWORDS: &[&str] = &["summary", "overview", "status"];
const WEEKLY_KEYWORDS: &[&str] = &["average resolved", "weekly resolved", "resolved per week"];
const WORKLOAD_KEYWORDS: &[&str] = &["workload", "how many", "count"];
const PRIORITY_KEYWORDS: &[&str] = &["urgent", "priority", "important"];
const HELP_KEYWORDS: &[&str] = &["help", "what can"];

/// Tried in order; the first non-empty capture is the title.
static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)create task[:\s]+(.*)",
        r"(?i)add task[:\s]+(.*)",
        r"(?i)new task[:\s]+(.*)",
        r"(?i)create\s*:\s*(.*)",
        r"(?i)add\s*:\s*(.*)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

/// Pull a proposed task title out of a creation request.
pub fn extract_task_title(query: &str) -> Option<String> {
    TITLE_PATTERNS.iter().find_map(|re| {
        re.captures(query)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|title| !title.is_empty())
    })
}

/// Everything a rule may look at. Built once per query.
pub struct RuleInput<'a> {
    pub raw: &'a str,
    pub lower: String,
    pub tasks: &'a [Task],
    assignees: Vec<String>,
}

impl RuleInput<'_> {
    fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.lower.contains(k))
    }

    /// Full identities win over email local parts ("user1" for "user1@example.com").
    /// Within each pass the longest mention wins, so "user10" is never read as "user1".
    fn find_assignee(&self) -> Option<String> {
        let full = self
            .assignees
            .iter()
            .rev()
            .filter(|a| mentions(&self.lower, a))
            .max_by_key(|a| a.len());
        if let Some(found) = full {
            return Some(found.clone());
        }

        self.assignees
            .iter()
            .rev()
            .filter_map(|a| match a.split_once('@') {
                Some((local, _)) if !local.is_empty() && mentions(&self.lower, local) => Some((a, local.len())),
                _ => None,
            })
            .max_by_key(|(_, len)| *len)
            .map(|(a, _)| a.clone())
    }
}

/// `token` appears in `haystack` as a whole word: not preceded or followed
/// by a letter, digit or underscore.
fn mentions(haystack: &str, token: &str) -> bool {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return false;
    }
    Regex::new(&format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&token)))
        .map(|re| re.is_match(haystack))
        .unwrap_or(false)
}

/// One row of the classification table.
pub struct Rule {
    pub tag: &'static str,
    pub predicate: fn(&RuleInput<'_>) -> bool,
    pub extract: fn(&RuleInput<'_>) -> Intent,
}

/// Order is the precedence: "create task: fix urgent bug" must hit
/// creation before priority. Weekly analytics sits ahead of the assignee
/// lookup so that "average resolved per week for user1" keeps its assignee.
pub static RULES: &[Rule] = &[
    Rule {
        tag: "create_task",
        predicate: |i| i.contains_any(CREATE_KEYWORDS),
        extract: |i| Intent::CreateTask { title: extract_task_title(i.raw) },
    },
    Rule {
        tag: "in_progress",
        predicate: |i| i.contains_any(IN_PROGRESS_KEYWORDS),
        extract: |_| Intent::InProgress,
    },
    Rule {
        tag: "to_do",
        predicate: |i| i.contains_any(TO_DO_KEYWORDS),
        extract: |_| Intent::ToDo,
    },
    Rule {
        tag: "done",
        predicate: |i| i.contains_any(DONE_KEYWORDS),
        extract: |_| Intent::Done,
    },
    Rule {
        tag: "summary",
        predicate: |i| i.contains_any(SUMMARY_KEYWORDS),
        extract: |_| Intent::Summary,
    },
    Rule {
        tag: "weekly_analytics",
        predicate: |i| i.contains_any(WEEKLY_KEYWORDS),
        extract: |i| Intent::WeeklyAnalytics { assignee: i.find_assignee() },
    },
    Rule {
        tag: "assignee_lookup",
        predicate: |i| i.find_assignee().is_some(),
        extract: |i| Intent::AssigneeLookup {
            assignee: i.find_assignee().unwrap_or_default(),
        },
    },
    Rule {
        tag: "workload",
        predicate: |i| i.contains_any(WORKLOAD_KEYWORDS),
        extract: |_| Intent::Workload,
    },
    Rule {
        tag: "priority",
        predicate: |i| i.contains_any(PRIORITY_KEYWORDS),
        extract: |_| Intent::Priority,
    },
    Rule {
        tag: "help",
        predicate: |i| i.contains_any(HELP_KEYWORDS) || i.lower.ends_with('?'),
        extract: |_| Intent::Help,
    },
    Rule {
        tag: "search",
        predicate: |i| !search(i.tasks, i.raw.trim()).is_empty(),
        extract: |i| Intent::Search { term: i.raw.trim().to_string() },
    },
];

/// Rule-based classifier. Holds only configuration; the task snapshot is
/// passed per call.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    known_assignees: Vec<String>,
}

impl IntentClassifier {
    pub fn new(known_assignees: Vec<String>) -> Self {
        Self { known_assignees }
    }

    pub fn known_assignees(&self) -> &[String] {
        &self.known_assignees
    }

    /// Never fails: anything the table does not claim is `Unknown`.
    pub fn classify(&self, query: &str, tasks: &[Task]) -> Intent {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Intent::Unknown { query: query.to_string() };
        }

        let input = RuleInput {
            raw: query,
            lower: trimmed.to_lowercase(),
            tasks,
            assignees: self.candidates(tasks),
        };

        for rule in RULES {
            if (rule.predicate)(&input) {
                debug!("Query matched rule '{}'", rule.tag);
                return (rule.extract)(&input);
            }
        }

        Intent::Unknown { query: query.to_string() }
    }

    /// Configured identities first, then any other assignee in the snapshot.
    fn candidates(&self, tasks: &[Task]) -> Vec<String> {
        let mut out = self.known_assignees.clone();
        for assignee in tasks.iter().filter_map(|t| t.assignee.as_ref()) {
            if !assignee.trim().is_empty() && !out.contains(assignee) {
                out.push(assignee.clone());
            }
        }
        out
    }
}
