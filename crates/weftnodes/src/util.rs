use async_trait::async_trait;
use weftcore::{
    ExecutionContext, NodeCategory, NodeError, NodeExecutor, NodeResult, NodeTypeDefinition, Value,
};

/// Returns the invocation payload unchanged
pub struct EchoExecutor;

pub fn echo_definition() -> NodeTypeDefinition {
    NodeTypeDefinition::new("util.echo", "Echo", NodeCategory::Utility)
        .with_description("Pass the incoming payload straight through")
        .with_input("payload", "json", false)
        .with_output("default", "json")
        .with_timeout_ms(1_000)
}

#[async_trait]
impl NodeExecutor for EchoExecutor {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        _config: &Value,
    ) -> Result<NodeResult, NodeError> {
        Ok(NodeResult::success()
            .with_data(ctx.payload.clone())
            .with_next("default"))
    }
}

/// Writes a configured message through the context logger
pub struct LogExecutor;

pub fn log_definition() -> NodeTypeDefinition {
    NodeTypeDefinition::new("util.log", "Log", NodeCategory::Utility)
        .with_description("Log a message for debugging a workflow run")
        .with_config_schema(Value::from(serde_json::json!({
            "type": "object",
            "properties": {
                "message": { "type": "string" },
                "level": { "enum": ["info", "warn", "error"] }
            }
        })))
        .with_output("default", "json")
        .with_timeout_ms(1_000)
}

#[async_trait]
impl NodeExecutor for LogExecutor {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        config: &Value,
    ) -> Result<NodeResult, NodeError> {
        let message = config
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("(no message)");
        let logger = &ctx.services.logger;

        match config.get("level").and_then(Value::as_str) {
            Some("warn") => logger.warn(message),
            Some("error") => logger.error(message),
            _ => logger.info(message),
        }

        Ok(NodeResult::success().with_data(ctx.payload.clone()))
    }
}
