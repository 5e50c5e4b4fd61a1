use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a single task execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default)]
    pub screenshots: Vec<Vec<u8>>,

    #[serde(default)]
    pub steps_taken: Vec<String>,

    #[serde(default)]
    pub execution_time: f64,

    pub started_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskResult {
    /// Fresh record stamped with the current time; settled by the caller.
    pub fn started() -> Self {
        Self {
            success: false,
            data: None,
            error: None,
            screenshots: Vec::new(),
            steps_taken: Vec::new(),
            execution_time: 0.0,
            started_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// Outcome of a structured data extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResult {
    pub success: bool,

    #[serde(default)]
    pub data: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(default)]
    pub extraction_time: f64,

    #[serde(default)]
    pub schema_validated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractResult {
    pub fn started(source_url: Option<&str>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            source_url: source_url.map(|u| u.to_string()),
            extraction_time: 0.0,
            schema_validated: false,
            error: None,
        }
    }
}

/// Aggregate outcome of a sequence of chained tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainResult {
    pub success: bool,

    #[serde(default)]
    pub results: Vec<TaskResult>,

    #[serde(default)]
    pub total_execution_time: f64,

    #[serde(default)]
    pub tasks_completed: usize,

    #[serde(default)]
    pub tasks_failed: usize,
}

impl ChainResult {
    /// An empty chain counts as successful until a task fails.
    pub fn started() -> Self {
        Self {
            success: true,
            results: Vec::new(),
            total_execution_time: 0.0,
            tasks_completed: 0,
            tasks_failed: 0,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.tasks_failed == 0 && self.tasks_completed > 0
    }
}
