use model_gateway_rs::model::llm::LlmInput;
use tracing::{debug, warn};

use crate::{
    error::Result,
    message::planner::generate_plan_messages,
    models::{PlanOutline, TaskPlan},
    planner::backend::LlmBackend,
    utils::StripCodeFence,
};

/// Turns a natural-language task into an advisory step plan. Planning is
/// best-effort: every failure path degrades to a single-step fallback plan,
/// so callers never have to handle a planning error.
pub struct TaskPlanner {
    backend: Option<Box<dyn LlmBackend>>,
}

impl TaskPlanner {
    pub fn new(backend: Box<dyn LlmBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Planner without a model backend; always produces fallback plans.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub async fn plan(&self, task: &str) -> TaskPlan {
        let Some(backend) = self.backend.as_deref() else {
            debug!("no model backend configured, using fallback plan");
            return TaskPlan::fallback(task);
        };

        match self.plan_with_model(backend, task).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!("task planning failed: {e}");
                TaskPlan::fallback(task)
            }
        }
    }

    async fn plan_with_model(&self, backend: &dyn LlmBackend, task: &str) -> Result<TaskPlan> {
        let input = LlmInput {
            messages: generate_plan_messages(task),
            max_tokens: Some(1000),
        };

        let content = backend.complete(input).await?;
        let outline: PlanOutline = serde_json::from_str(content.strip_code_fence())?;

        Ok(TaskPlan::from_outline(task, outline))
    }
}
