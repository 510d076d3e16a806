use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use super::{LocalResolver, QueryResolver};
use crate::error::{LlmError, ResolveError};
use crate::intent::Query;
use crate::response::ResponseResult;
use crate::services::llm::prompt::{clean_response, conversation_prompt, task_digest};
use crate::services::llm::GenerativeBackend;
use crate::tasks::Task;

/// Lets the model write the text. Counts, chart choice, chart data and
/// suggested actions still come from the local pipeline so the dashboard
/// sees the same structure either way.
pub struct GenerativeResolver {
    local: LocalResolver,
    backend: Arc<dyn GenerativeBackend>,
}

impl GenerativeResolver {
    pub fn new(local: LocalResolver, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { local, backend }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }
}

#[async_trait]
impl QueryResolver for GenerativeResolver {
    async fn resolve(&self, query: &Query, tasks: &[Task]) -> Result<ResponseResult, ResolveError> {
        if !self.backend.is_available() {
            return Err(LlmError::Unavailable.into());
        }

        let prompt = conversation_prompt(&query.text, query.context.as_deref());
        let raw = self.backend.generate(&prompt, &task_digest(tasks)).await?;
        let text = clean_response(&raw);
        if text.is_empty() {
            return Err(LlmError::Empty.into());
        }
        debug!("Generative resolver produced {} chars", text.len());

        let mut result = self.local.answer(&query.text, tasks);
        result.text = text;
        Ok(result)
    }
}
