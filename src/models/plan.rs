use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One atomic action in an execution plan. Advisory: the whole task string is
/// still handed to the automation backend in a single call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionStep {
    pub action: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    #[serde(default = "default_true")]
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<Vec<u8>>,
}

impl ActionStep {
    pub fn new(action: &str, target: Option<String>, value: Option<String>) -> Self {
        Self {
            action: action.to_string(),
            target,
            value,
            timestamp: Utc::now(),
            success: true,
            screenshot: None,
        }
    }
}

/// Planned steps plus risk and duration metadata for one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPlan {
    pub task: String,

    #[serde(default)]
    pub steps: Vec<ActionStep>,

    #[serde(default)]
    pub estimated_duration: f64,

    #[serde(default)]
    pub requires_auth: bool,

    #[serde(default)]
    pub human_review_needed: bool,
}

impl TaskPlan {
    /// Single-step plan used whenever the model cannot be consulted.
    pub fn fallback(task: &str) -> Self {
        Self {
            task: task.to_string(),
            steps: vec![ActionStep::new("execute", None, Some(task.to_string()))],
            estimated_duration: 30.0,
            requires_auth: false,
            human_review_needed: false,
        }
    }

    pub fn from_outline(task: &str, outline: PlanOutline) -> Self {
        let steps = outline
            .steps
            .into_iter()
            .map(|s| ActionStep::new(&s.action, s.target, s.value))
            .collect();

        Self {
            task: task.to_string(),
            steps,
            estimated_duration: outline.estimated_duration,
            requires_auth: outline.requires_auth,
            human_review_needed: outline.human_review_needed,
        }
    }
}

/// Shape of the JSON object the model is asked to reply with. Every field is
/// defaulted so a sparse reply still parses.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanOutline {
    #[serde(default)]
    pub steps: Vec<StepOutline>,

    #[serde(default = "default_duration")]
    pub estimated_duration: f64,

    #[serde(default)]
    pub requires_auth: bool,

    #[serde(default)]
    pub human_review_needed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepOutline {
    #[serde(default)]
    pub action: String,

    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_duration() -> f64 {
    30.0
}
