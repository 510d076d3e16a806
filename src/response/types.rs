use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Pie,
    Bar,
    Timeline,
    Table,
    WeeklyTrend,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
            ChartKind::Timeline => "timeline",
            ChartKind::Table => "table",
            ChartKind::WeeklyTrend => "weekly_trend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartData {
    Weekly(AnalyticsResult),
    Counts(IndexMap<String, usize>),
}

/// What the presentation layer gets back for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult {
    pub text: String,
    pub task_count: usize,
    pub suggested_actions: Vec<String>,
    pub chart_recommendation: Option<ChartKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartData>,
}

impl ResponseResult {
    pub fn new(text: impl Into<String>, task_count: usize) -> Self {
        Self {
            text: text.into(),
            task_count,
            suggested_actions: Vec::new(),
            chart_recommendation: None,
            chart_data: None,
        }
    }

    pub fn actions(mut self, actions: &[&str]) -> Self {
        self.suggested_actions = actions.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn chart(mut self, kind: Option<ChartKind>) -> Self {
        self.chart_recommendation = kind;
        self
    }

    pub fn data(mut self, data: ChartData) -> Self {
        self.chart_data = Some(data);
        self
    }
}
