use async_trait::async_trait;
use tokio::time::{sleep, Duration};
use weftcore::{
    ExecutionContext, NodeCategory, NodeError, NodeExecutor, NodeResult, NodeTypeDefinition, Value,
};

/// Pauses a workflow branch for a configured duration.
///
/// Observes the context abort token while sleeping, so a caller that gives
/// up on the invocation can cut the wait short.
pub struct DelayExecutor;

pub fn delay_definition() -> NodeTypeDefinition {
    NodeTypeDefinition::new("time.delay", "Delay", NodeCategory::Logic)
        .with_description("Wait a fixed number of milliseconds before continuing")
        .with_config_schema(Value::from(serde_json::json!({
            "type": "object",
            "properties": { "delay_ms": { "type": "number" } }
        })))
        .with_output("default", "json")
        .with_timeout_ms(60_000)
}

#[async_trait]
impl NodeExecutor for DelayExecutor {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        config: &Value,
    ) -> Result<NodeResult, NodeError> {
        let delay_ms = config
            .get("delay_ms")
            .and_then(Value::as_u64)
            .unwrap_or(1_000);

        ctx.services
            .logger
            .info(&format!("delaying for {delay_ms}ms"));

        tokio::select! {
            _ = sleep(Duration::from_millis(delay_ms)) => {
                Ok(NodeResult::success().with_data(ctx.payload.clone()))
            }
            _ = ctx.abort.cancelled() => Err(NodeError::Cancelled),
        }
    }
}
