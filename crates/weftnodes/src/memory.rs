use async_trait::async_trait;
use weftcore::{
    ExecutionContext, NodeCategory, NodeError, NodeExecutor, NodeResult, NodeTypeDefinition, Value,
};

/// Proposes shared-memory writes from its config.
///
/// The executor itself never touches storage; it only attaches the writes
/// to the result, and the engine persists them after success.
pub struct MemorySetExecutor;

pub fn memory_set_definition() -> NodeTypeDefinition {
    NodeTypeDefinition::new("memory.set", "Set Memory", NodeCategory::Memory)
        .with_description("Write one or more keys into shared workflow memory")
        .with_config_schema(Value::from(serde_json::json!({
            "type": "object",
            "required": ["entries"],
            "properties": { "entries": { "type": "object" } }
        })))
        .with_output("default", "json")
        .with_timeout_ms(5_000)
}

#[async_trait]
impl NodeExecutor for MemorySetExecutor {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        config: &Value,
    ) -> Result<NodeResult, NodeError> {
        let entries = config
            .get("entries")
            .and_then(Value::as_object)
            .ok_or_else(|| NodeError::InvalidConfig("missing 'entries' object".to_string()))?;

        let mut result = NodeResult::success().with_data(ctx.payload.clone());
        for (key, value) in entries {
            result = result.with_memory(key.clone(), value.clone());
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn proposes_configured_entries() {
        let ctx = ExecutionContext::builder("wf", "exec", "n1").build();
        let config = Value::from(serde_json::json!({
            "entries": { "step": "done", "count": 2.0 }
        }));

        let result = MemorySetExecutor.execute(&ctx, &config).await.unwrap();
        let updates = result.updated_memory.unwrap();
        assert_eq!(updates.get("step"), Some(&Value::from("done")));
        assert_eq!(updates.get("count"), Some(&Value::from(2.0)));
    }

    #[tokio::test]
    async fn missing_entries_is_a_config_error() {
        let ctx = ExecutionContext::builder("wf", "exec", "n1").build();
        let err = MemorySetExecutor
            .execute(&ctx, &Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, NodeError::InvalidConfig(_)));
    }
}
