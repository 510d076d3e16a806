pub mod client;
pub mod issue;

pub use client::{is_issue_key, JiraTaskStore};
