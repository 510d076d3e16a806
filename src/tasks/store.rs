use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::mock::seed_tasks;
use super::types::{NewTask, SearchPage, Task, TaskFilter, TaskStatus};
use crate::error::StoreError;

/// Read/create interface to wherever tasks live (Jira or in-memory data).
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError>;
    async fn get_task(&self, id: &str) -> Result<Task, StoreError>;
    async fn create_task(&self, new: NewTask) -> Result<Task, StoreError>;
    /// JQL is passed through untouched; stores that cannot evaluate it
    /// return their unfiltered data.
    async fn search_jql(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<SearchPage, StoreError>;
}

/// In-memory store seeded with demo data.
pub struct MockTaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl MockTaskStore {
    pub fn new() -> Self {
        Self::with_tasks(seed_tasks(Utc::now()))
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }
}

impl Default for MockTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MockTaskStore {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        Ok(filter.apply(self.tasks.read().await.clone()))
    }

    async fn get_task(&self, id: &str) -> Result<Task, StoreError> {
        self.tasks
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn create_task(&self, new: NewTask) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        let now = Utc::now();
        let mut task = Task::new(format!("JIRA-{}", tasks.len() + 1), new.title.trim(), TaskStatus::ToDo);
        task.description = new.description;
        task.assignee = new.assignee.filter(|a| !a.trim().is_empty());
        task.created_date = Some(now);
        task.updated_date = Some(now);
        tasks.push(task.clone());
        debug!("Mock store created {}", task.id);
        Ok(task)
    }

    async fn search_jql(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<SearchPage, StoreError> {
        debug!("Mock store ignoring JQL '{}'", jql);
        let tasks = self.tasks.read().await;
        Ok(SearchPage {
            issues: tasks.iter().skip(start_at).take(max_results).cloned().collect(),
            total: tasks.len(),
        })
    }
}

/// Wraps an optional live store. Any failure of the live store is logged and
/// answered from the last good snapshot, or from mock data if there is none.
pub struct FallbackTaskStore {
    primary: Option<Arc<dyn TaskStore>>,
    fallback: MockTaskStore,
    cache: RwLock<Option<Vec<Task>>>,
    timeout: Duration,
}

impl FallbackTaskStore {
    pub fn new(primary: Option<Arc<dyn TaskStore>>, fallback: MockTaskStore, timeout: Duration) -> Self {
        Self {
            primary,
            fallback,
            cache: RwLock::new(None),
            timeout,
        }
    }

    /// Mock data only.
    pub fn offline() -> Self {
        Self::new(None, MockTaskStore::new(), Duration::from_secs(5))
    }

    pub fn is_live(&self) -> bool {
        self.primary.is_some()
    }

    /// Full task list for one query. Never fails.
    pub async fn snapshot(&self) -> Vec<Task> {
        match self.list_tasks(&TaskFilter::default()).await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("Fallback store failed unexpectedly: {}", e);
                Vec::new()
            }
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: std::future::Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(StoreError::Timeout(self.timeout.as_millis() as u64)),
        }
    }

    async fn cached_or_mock(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        if let Some(cached) = self.cache.read().await.as_ref() {
            return Ok(filter.apply(cached.clone()));
        }
        self.fallback.list_tasks(filter).await
    }
}

#[async_trait]
impl TaskStore for FallbackTaskStore {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let Some(primary) = &self.primary else {
            return self.fallback.list_tasks(filter).await;
        };

        match self.bounded(primary.list_tasks(filter)).await {
            Ok(tasks) => {
                if filter.status.is_none() && filter.assignee.is_none() {
                    *self.cache.write().await = Some(tasks.clone());
                }
                Ok(tasks)
            }
            Err(e) => {
                warn!("Task store unavailable ({}), serving fallback data", e);
                self.cached_or_mock(filter).await
            }
        }
    }

    async fn get_task(&self, id: &str) -> Result<Task, StoreError> {
        let Some(primary) = &self.primary else {
            return self.fallback.get_task(id).await;
        };

        match self.bounded(primary.get_task(id)).await {
            Err(StoreError::NotFound(id)) => Err(StoreError::NotFound(id)),
            Err(e) => {
                warn!("Task store unavailable ({}), looking up {} in fallback data", e, id);
                self.cached_or_mock(&TaskFilter::default())
                    .await?
                    .into_iter()
                    .find(|t| t.id == id)
                    .ok_or_else(|| StoreError::NotFound(id.to_string()))
            }
            ok => ok,
        }
    }

    async fn create_task(&self, new: NewTask) -> Result<Task, StoreError> {
        let Some(primary) = &self.primary else {
            return self.fallback.create_task(new).await;
        };

        match self.bounded(primary.create_task(new.clone())).await {
            Ok(task) => Ok(task),
            Err(e) => {
                warn!("Task creation failed on live store ({}), creating mock task", e);
                self.fallback.create_task(new).await
            }
        }
    }

    async fn search_jql(
        &self,
        jql: &str,
        start_at: usize,
        max_results: usize,
    ) -> Result<SearchPage, StoreError> {
        let Some(primary) = &self.primary else {
            return self.fallback.search_jql(jql, start_at, max_results).await;
        };

        match self.bounded(primary.search_jql(jql, start_at, max_results)).await {
            Ok(page) => Ok(page),
            Err(e) => {
                warn!("JQL execution failed ({}), using fallback data", e);
                let tasks = self.cached_or_mock(&TaskFilter::default()).await?;
                let issues: Vec<Task> = tasks.into_iter().take(max_results).collect();
                Ok(SearchPage {
                    total: issues.len(),
                    issues,
                })
            }
        }
    }
}
