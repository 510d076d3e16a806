use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::AppConfig;
use crate::history::ConversationHistory;
use crate::intent::IntentClassifier;
use crate::resolver::{GenerativeResolver, LocalResolver, ResolverChain};
use crate::response::ResponseSynthesizer;
use crate::services::jira::JiraTaskStore;
use crate::services::jql::JqlConverter;
use crate::services::llm::{GenerativeBackend, LLMService};
use crate::tasks::{FallbackTaskStore, MockTaskStore, TaskStore};

const JQL_TEMPERATURE: f32 = 0.1;

/// Shared handles for every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FallbackTaskStore>,
    pub resolver: Arc<ResolverChain>,
    pub jql: Arc<JqlConverter>,
    pub history: Arc<RwLock<ConversationHistory>>,
    pub weeks: u32,
}

impl AppState {
    pub fn new(store: FallbackTaskStore, resolver: ResolverChain, jql: JqlConverter, weeks: u32) -> Self {
        Self {
            store: Arc::new(store),
            resolver: Arc::new(resolver),
            jql: Arc::new(jql),
            history: Arc::new(RwLock::new(ConversationHistory::new())),
            weeks,
        }
    }

    /// Mock data, rule-based answers, pattern JQL.
    pub fn offline(weeks: u32) -> Self {
        let local = LocalResolver::new(IntentClassifier::default(), ResponseSynthesizer::new(weeks));
        Self::new(
            FallbackTaskStore::offline(),
            ResolverChain::local_only(local),
            JqlConverter::new(None, None, Duration::from_secs(2)),
            weeks,
        )
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let store = match &config.jira {
            Some(jira) => {
                info!("Live task store: {}", jira.server);
                let live: Arc<dyn TaskStore> = Arc::new(JiraTaskStore::new(jira));
                FallbackTaskStore::new(Some(live), MockTaskStore::new(), jira.timeout)
            }
            None => {
                info!("Jira not configured, serving mock tasks");
                FallbackTaskStore::offline()
            }
        };

        let local = LocalResolver::new(
            IntentClassifier::new(config.known_assignees.clone()),
            ResponseSynthesizer::new(config.analytics_weeks),
        );

        let (resolver, jql) = match &config.llm {
            Some(llm) => {
                info!("Generative backend: {}", llm.base_url);
                let service = LLMService::new(llm);
                let chat: Arc<dyn GenerativeBackend> = Arc::new(service.clone());
                let jql_backend: Arc<dyn GenerativeBackend> = Arc::new(service.with_temperature(JQL_TEMPERATURE));
                (
                    ResolverChain::new(Some(GenerativeResolver::new(local.clone(), chat)), local, llm.timeout),
                    JqlConverter::new(Some(jql_backend), config.project_key.clone(), llm.timeout),
                )
            }
            None => {
                info!("Generative backend disabled, using rule-based answers");
                (
                    ResolverChain::local_only(local),
                    JqlConverter::new(None, config.project_key.clone(), Duration::from_secs(2)),
                )
            }
        };

        Self::new(store, resolver, jql, config.analytics_weeks)
    }
}
