use model_gateway_rs::model::llm::ChatMessage;

use crate::prompt::builder::build_plan_prompt;

pub fn generate_plan_messages(task: &str) -> Vec<ChatMessage> {
    vec![generate_system_message(), generate_user_message(task)]
}

fn generate_system_message() -> ChatMessage {
    let content = r#"
You are a web automation planning assistant.
Your only output should be valid JSON matching this structure.

Output JSON structure:
{
  "steps": [
    {
      "action": "string",
      "target": "css selector or null",
      "value": "text to enter or null"
    }
  ],
  "estimated_duration": 30.0,
  "requires_auth": false,
  "human_review_needed": false
}

Set "requires_auth" to true when the task needs a signed-in account.
Set "human_review_needed" to true for purchases, deletions, or anything
irreversible.

Answer deterministically: the same task must always produce the same plan.
Never include any notes, explanations, or natural language.
Only output the JSON in the exact structure above.
"#;
    ChatMessage::system(content)
}

fn generate_user_message(task: &str) -> ChatMessage {
    let content = build_plan_prompt(task);
    ChatMessage::user(content.as_str())
}
