use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use super::{GenerativeResolver, LocalResolver, QueryResolver};
use crate::error::ResolveError;
use crate::intent::Query;
use crate::response::ResponseResult;
use crate::tasks::Task;

/// Tries the generative resolver under a hard timeout and falls back to the
/// local one on any failure. Callers always get an answer.
pub struct ResolverChain {
    remote: Option<GenerativeResolver>,
    local: LocalResolver,
    timeout: Duration,
}

impl ResolverChain {
    pub fn new(remote: Option<GenerativeResolver>, local: LocalResolver, timeout: Duration) -> Self {
        Self {
            remote,
            local,
            timeout,
        }
    }

    /// Local resolver only.
    pub fn local_only(local: LocalResolver) -> Self {
        Self::new(None, local, Duration::from_secs(2))
    }

    pub fn has_remote(&self) -> bool {
        self.remote.as_ref().is_some_and(|r| r.is_available())
    }

    pub async fn answer(&self, query: &Query, tasks: &[Task]) -> ResponseResult {
        if let Some(remote) = self.remote.as_ref().filter(|r| r.is_available()) {
            match tokio::time::timeout(self.timeout, remote.resolve(query, tasks)).await {
                Ok(Ok(result)) => {
                    info!("Query answered by generative resolver");
                    return result;
                }
                Ok(Err(e)) => warn!("Generative resolver failed: {}, using local resolver", e),
                Err(_) => warn!(
                    "Generative resolver timed out after {}ms, using local resolver",
                    self.timeout.as_millis()
                ),
            }
        }

        self.local.answer(&query.text, tasks)
    }
}

#[async_trait]
impl QueryResolver for ResolverChain {
    async fn resolve(&self, query: &Query, tasks: &[Task]) -> Result<ResponseResult, ResolveError> {
        Ok(self.answer(query, tasks).await)
    }
}
