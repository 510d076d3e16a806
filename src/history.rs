use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::response::ResponseResult;

/// Oldest entries are dropped past this.
pub const MAX_ENTRIES: usize = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub query: String,
    pub response: ResponseResult,
    pub timestamp: DateTime<Utc>,
}

/// In-memory record of answered queries. Process lifetime only.
#[derive(Debug)]
pub struct ConversationHistory {
    buffer: VecDeque<HistoryEntry>,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
        }
    }

    pub fn record(&mut self, query: impl Into<String>, response: ResponseResult) -> &HistoryEntry {
        if self.buffer.len() >= MAX_ENTRIES {
            self.buffer.pop_front();
        }
        self.buffer.push_back(HistoryEntry {
            id: Uuid::new_v4(),
            query: query.into(),
            response,
            timestamp: Utc::now(),
        });
        &self.buffer[self.buffer.len() - 1]
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.buffer.iter().rev().take(limit).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
