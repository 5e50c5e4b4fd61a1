pub fn build_plan_prompt(task: &str) -> String {
    format!(
        r#"
Analyze this web automation task and create an execution plan.

Task: {task}

Be specific about selectors and actions. Keep steps atomic.
"#
    )
}

pub fn build_extract_prompt(task: &str) -> String {
    format!("{task}. Return the result as JSON.")
}
