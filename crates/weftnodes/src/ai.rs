use async_trait::async_trait;
use weftcore::{
    ChatMessage, ChatOptions, ExecutionContext, NodeCategory, NodeError, NodeExecutor, NodeResult,
    NodeTypeDefinition, Value,
};

/// Sends the payload (or a configured prompt) to the `llm` service
pub struct ChatExecutor;

pub fn chat_definition() -> NodeTypeDefinition {
    NodeTypeDefinition::new("ai.chat", "AI Chat", NodeCategory::Ai)
        .with_description("Ask the configured language model a question")
        .with_config_schema(Value::from(serde_json::json!({
            "type": "object",
            "properties": {
                "prompt": { "type": "string" },
                "system": { "type": "string" },
                "model": { "type": "string" }
            }
        })))
        .with_input("prompt", "string", false)
        .with_output("default", "string")
        .with_output("error", "json")
        .with_timeout_ms(60_000)
        .with_retry(1, 2_000)
}

#[async_trait]
impl NodeExecutor for ChatExecutor {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        config: &Value,
    ) -> Result<NodeResult, NodeError> {
        let llm = match ctx.services.llm.as_ref() {
            Some(llm) => llm,
            None => {
                return Ok(NodeResult::error(
                    "LLM_UNAVAILABLE",
                    "no llm service available on this context",
                )
                .with_next("error"))
            }
        };

        let prompt = config
            .get("prompt")
            .and_then(Value::as_str)
            .or_else(|| ctx.payload.as_str())
            .ok_or_else(|| NodeError::MissingInput("prompt".to_string()))?;

        let mut messages = Vec::new();
        if let Some(system) = config.get("system").and_then(Value::as_str) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        let options = ChatOptions {
            model: config
                .get("model")
                .and_then(Value::as_str)
                .map(String::from),
            ..ChatOptions::default()
        };

        match llm.chat(messages, options).await {
            Ok(reply) => Ok(NodeResult::success().with_data(reply)),
            Err(err) => Ok(NodeResult::error("LLM_ERROR", err.to_string()).with_next("error")),
        }
    }
}
