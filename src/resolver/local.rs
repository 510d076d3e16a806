use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::QueryResolver;
use crate::error::ResolveError;
use crate::intent::{Intent, IntentClassifier, Query};
use crate::response::{ResponseResult, ResponseSynthesizer};
use crate::tasks::Task;

/// Classifier plus synthesizer. Deterministic and infallible.
#[derive(Debug, Clone, Default)]
pub struct LocalResolver {
    classifier: IntentClassifier,
    synthesizer: ResponseSynthesizer,
}

impl LocalResolver {
    pub fn new(classifier: IntentClassifier, synthesizer: ResponseSynthesizer) -> Self {
        Self {
            classifier,
            synthesizer,
        }
    }

    pub fn classify(&self, text: &str, tasks: &[Task]) -> Intent {
        self.classifier.classify(text, tasks)
    }

    pub fn answer(&self, text: &str, tasks: &[Task]) -> ResponseResult {
        self.answer_at(text, tasks, Utc::now())
    }

    pub fn answer_at(&self, text: &str, tasks: &[Task], now: DateTime<Utc>) -> ResponseResult {
        let intent = self.classify(text, tasks);
        debug!("Local resolver intent: {}", intent.tag());
        self.synthesizer.synthesize_at(&intent, tasks, now)
    }
}

#[async_trait]
impl QueryResolver for LocalResolver {
    async fn resolve(&self, query: &Query, tasks: &[Task]) -> Result<ResponseResult, ResolveError> {
        Ok(self.answer(&query.text, tasks))
    }
}
