#[cfg(test)]
mod planner_tests {
    use async_trait::async_trait;
    use model_gateway_rs::model::llm::LlmInput;
    use webpilot::{
        error::{Error, Result},
        models::TaskPlan,
        planner::{LlmBackend, TaskPlanner},
        utils::StripCodeFence,
    };

    struct CannedBackend {
        reply: &'static str,
    }

    #[async_trait]
    impl LlmBackend for CannedBackend {
        async fn complete(&self, _input: LlmInput) -> Result<String> {
            Ok(self.reply.to_string())
        }
    }

    struct UnreachableBackend;

    #[async_trait]
    impl LlmBackend for UnreachableBackend {
        async fn complete(&self, _input: LlmInput) -> Result<String> {
            Err(Error::Session("model endpoint unreachable".to_string()))
        }
    }

    fn assert_fallback(plan: &TaskPlan, task: &str) {
        assert_eq!(plan.task, task);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].action, "execute");
        assert_eq!(plan.steps[0].value.as_deref(), Some(task));
        assert_eq!(plan.estimated_duration, 30.0);
        assert!(!plan.requires_auth);
        assert!(!plan.human_review_needed);
    }

    #[tokio::test]
    async fn planner_without_backend_falls_back() {
        let planner = TaskPlanner::disabled();

        let plan = planner.plan("Navigate to example.com").await;

        assert_fallback(&plan, "Navigate to example.com");
    }

    #[tokio::test]
    async fn unreachable_backend_falls_back() {
        let planner = TaskPlanner::new(Box::new(UnreachableBackend));

        let plan = planner.plan("Search for rust jobs").await;

        assert_fallback(&plan, "Search for rust jobs");
    }

    #[tokio::test]
    async fn garbage_reply_falls_back() {
        let planner = TaskPlanner::new(Box::new(CannedBackend {
            reply: "I think you should click around a bit.",
        }));

        let plan = planner.plan("Buy a keyboard").await;

        assert_fallback(&plan, "Buy a keyboard");
    }

    #[tokio::test]
    async fn fenced_json_reply_parses_into_plan() {
        let planner = TaskPlanner::new(Box::new(CannedBackend {
            reply: r##"```json
{
  "steps": [
    {"action": "navigate", "value": "https://example.com/login"},
    {"action": "click", "target": "#submit"}
  ],
  "estimated_duration": 12.5,
  "requires_auth": true,
  "human_review_needed": false
}
```"##,
        }));

        let plan = planner.plan("Log in").await;

        assert_eq!(plan.task, "Log in");
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].action, "navigate");
        assert_eq!(
            plan.steps[0].value.as_deref(),
            Some("https://example.com/login")
        );
        assert_eq!(plan.steps[0].target, None);
        assert_eq!(plan.steps[1].action, "click");
        assert_eq!(plan.steps[1].target.as_deref(), Some("#submit"));
        assert_eq!(plan.estimated_duration, 12.5);
        assert!(plan.requires_auth);
        assert!(!plan.human_review_needed);
    }

    #[tokio::test]
    async fn sparse_reply_takes_defaults() {
        let planner = TaskPlanner::new(Box::new(CannedBackend { reply: "{}" }));

        let plan = planner.plan("Do nothing much").await;

        assert!(plan.steps.is_empty());
        assert_eq!(plan.estimated_duration, 30.0);
        assert!(!plan.requires_auth);
        assert!(!plan.human_review_needed);
    }

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!("```json\n{\"a\":1}\n```".strip_code_fence(), "{\"a\":1}");
        assert_eq!("```\n[1,2]\n```".strip_code_fence(), "[1,2]");
        assert_eq!("  {\"a\":1}  ".strip_code_fence(), "{\"a\":1}");
        // An unterminated fence is left alone.
        assert_eq!("```json\n{\"a\":1}".strip_code_fence(), "```json\n{\"a\":1}");
    }
}
