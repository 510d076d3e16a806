pub mod jira;
pub mod jql;
pub mod llm;
