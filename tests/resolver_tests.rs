use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use jira_helper::error::{LlmError, StoreError};
use jira_helper::resolver::{GenerativeResolver, LocalResolver, QueryResolver, ResolverChain};
use jira_helper::response::ChartKind;
use jira_helper::services::llm::GenerativeBackend;
use jira_helper::tasks::mock::seed_tasks;
use jira_helper::tasks::{
    FallbackTaskStore, MockTaskStore, NewTask, SearchPage, Task, TaskFilter, TaskStatus, TaskStore,
};
use jira_helper::Query;

struct CannedBackend(&'static str);

#[async_trait]
impl GenerativeBackend for CannedBackend {
    fn is_available(&self) -> bool {
        true
    }
    async fn generate(&self, _prompt: &str, _context: &str) -> Result<String, LlmError> {
        Ok(self.0.to_string())
    }
}

struct FailingBackend;

#[async_trait]
impl GenerativeBackend for FailingBackend {
    fn is_available(&self) -> bool {
        true
    }
    async fn generate(&self, _prompt: &str, _context: &str) -> Result<String, LlmError> {
        Err(LlmError::Empty)
    }
}

struct SlowBackend;

#[async_trait]
impl GenerativeBackend for SlowBackend {
    fn is_available(&self) -> bool {
        true
    }
    async fn generate(&self, _prompt: &str, _context: &str) -> Result<String, LlmError> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok("too late".to_string())
    }
}

struct OfflineBackend;

#[async_trait]
impl GenerativeBackend for OfflineBackend {
    fn is_available(&self) -> bool {
        false
    }
    async fn generate(&self, _prompt: &str, _context: &str) -> Result<String, LlmError> {
        panic!("offline backend must not be called");
    }
}

fn chain(backend: Arc<dyn GenerativeBackend>) -> ResolverChain {
    let local = LocalResolver::default();
    ResolverChain::new(
        Some(GenerativeResolver::new(local.clone(), backend)),
        local,
        Duration::from_millis(50),
    )
}

#[tokio::test]
async fn test_generative_text_keeps_local_structure() {
    let tasks = seed_tasks(Utc::now());
    let result = chain(Arc::new(CannedBackend("Assistant: Two tasks are in progress.")))
        .answer(&Query::new("what is in progress?"), &tasks)
        .await;

    assert_eq!(result.text, "Two tasks are in progress.");
    assert_eq!(result.task_count, 2);
    assert_eq!(result.chart_recommendation, Some(ChartKind::Timeline));
}

#[tokio::test]
async fn test_failing_backend_falls_back() {
    let tasks = seed_tasks(Utc::now());
    let query = Query::new("give me a summary");
    let expected = LocalResolver::default().answer(&query.text, &tasks);

    let result = chain(Arc::new(FailingBackend)).answer(&query, &tasks).await;
    assert_eq!(result.text, expected.text);
    assert_eq!(result.task_count, 6);
}

#[tokio::test]
async fn test_empty_completion_falls_back() {
    let tasks = seed_tasks(Utc::now());
    let result = chain(Arc::new(CannedBackend("Assistant:   ")))
        .answer(&Query::new("help"), &tasks)
        .await;
    assert!(result.text.starts_with("AI Assistant Help"));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let tasks = seed_tasks(Utc::now());
    let result = chain(Arc::new(SlowBackend))
        .answer(&Query::new("what is done?"), &tasks)
        .await;

    assert_ne!(result.text, "too late");
    assert!(result.text.contains("Found 2 tasks with status 'Done'"), "{}", result.text);
}

#[tokio::test]
async fn test_unavailable_backend_is_skipped() {
    let resolver = chain(Arc::new(OfflineBackend));
    assert!(!resolver.has_remote());

    let result = resolver.resolve(&Query::new("xyzzy"), &[]).await.unwrap();
    assert_eq!(result.task_count, 0);
}

#[tokio::test]
async fn test_generative_resolver_surfaces_errors() {
    let resolver = GenerativeResolver::new(LocalResolver::default(), Arc::new(FailingBackend));
    let err = resolver.resolve(&Query::new("help"), &[]).await;
    assert!(err.is_err());
}

/// Live store stand-in that can be switched off mid-test.
struct FlakyStore {
    up: AtomicBool,
    tasks: Vec<Task>,
}

#[async_trait]
impl TaskStore for FlakyStore {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        if self.up.load(Ordering::SeqCst) {
            Ok(filter.apply(self.tasks.clone()))
        } else {
            Err(StoreError::Decode("connection reset".into()))
        }
    }

    async fn get_task(&self, id: &str) -> Result<Task, StoreError> {
        if self.up.load(Ordering::SeqCst) {
            Err(StoreError::NotFound(id.to_string()))
        } else {
            Err(StoreError::Decode("connection reset".into()))
        }
    }

    async fn create_task(&self, _new: NewTask) -> Result<Task, StoreError> {
        Err(StoreError::Decode("read only".into()))
    }

    async fn search_jql(&self, _jql: &str, _start_at: usize, _max: usize) -> Result<SearchPage, StoreError> {
        Err(StoreError::Decode("connection reset".into()))
    }
}

struct HangingStore;

#[async_trait]
impl TaskStore for HangingStore {
    async fn list_tasks(&self, _filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Vec::new())
    }
    async fn get_task(&self, id: &str) -> Result<Task, StoreError> {
        Err(StoreError::NotFound(id.to_string()))
    }
    async fn create_task(&self, _new: NewTask) -> Result<Task, StoreError> {
        Err(StoreError::Decode("read only".into()))
    }
    async fn search_jql(&self, _jql: &str, _start_at: usize, _max: usize) -> Result<SearchPage, StoreError> {
        Ok(SearchPage { issues: Vec::new(), total: 0 })
    }
}

fn live_tasks() -> Vec<Task> {
    vec![
        Task::new("LIVE-1", "Live one", TaskStatus::ToDo),
        Task::new("LIVE-2", "Live two", TaskStatus::Done),
    ]
}

#[tokio::test]
async fn test_store_falls_back_to_mock() {
    let primary = Arc::new(FlakyStore { up: AtomicBool::new(false), tasks: live_tasks() });
    let store = FallbackTaskStore::new(Some(primary), MockTaskStore::new(), Duration::from_millis(100));

    let tasks = store.snapshot().await;
    assert_eq!(tasks.len(), 6);
    assert_eq!(tasks[0].id, "JIRA-1");
}

#[tokio::test]
async fn test_store_serves_cached_snapshot() {
    let primary = Arc::new(FlakyStore { up: AtomicBool::new(true), tasks: live_tasks() });
    let store = FallbackTaskStore::new(Some(primary.clone()), MockTaskStore::new(), Duration::from_millis(100));

    assert_eq!(store.snapshot().await.len(), 2);
    primary.up.store(false, Ordering::SeqCst);

    let cached = store.snapshot().await;
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].id, "LIVE-1");

    let found = store.get_task("LIVE-2").await.unwrap();
    assert_eq!(found.status, TaskStatus::Done);
}

#[tokio::test]
async fn test_store_not_found_is_propagated() {
    let primary = Arc::new(FlakyStore { up: AtomicBool::new(true), tasks: live_tasks() });
    let store = FallbackTaskStore::new(Some(primary), MockTaskStore::new(), Duration::from_millis(100));

    assert!(matches!(store.get_task("JIRA-1").await, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_store_timeout_falls_back() {
    let store = FallbackTaskStore::new(Some(Arc::new(HangingStore)), MockTaskStore::new(), Duration::from_millis(20));
    assert_eq!(store.snapshot().await.len(), 6);
}

#[tokio::test]
async fn test_failed_create_lands_in_mock() {
    let primary = Arc::new(FlakyStore { up: AtomicBool::new(false), tasks: live_tasks() });
    let store = FallbackTaskStore::new(Some(primary), MockTaskStore::new(), Duration::from_millis(100));

    let created = store
        .create_task(NewTask { title: "  New thing ".into(), description: None, assignee: None })
        .await
        .unwrap();
    assert_eq!(created.id, "JIRA-7");
    assert_eq!(created.title, "New thing");
    assert_eq!(created.status, TaskStatus::ToDo);
}
