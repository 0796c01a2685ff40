use crate::memory::apply_memory_updates;
use crate::registry::NodeRegistry;
use crate::router::{route_node_output, ConnectionTable};
use std::sync::Arc;
use weftcore::{EngineError, ExecutionContext, NodeResult, Value};

/// Façade over the engine for callers that execute one node at a time.
///
/// Ties dispatch, memory persistence, and routing together: the graph
/// orchestrator above this runtime decides *which* node runs next, this
/// runtime runs exactly one node per call.
pub struct NodeRuntime {
    registry: Arc<NodeRegistry>,
}

impl NodeRuntime {
    pub fn new(registry: Arc<NodeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    /// Execute one node under its registered policy and persist its proposed
    /// memory writes on success.
    ///
    /// Returns `Err` only for an unknown node type or a storage rejection
    /// while applying memory; every handler-level outcome is in the result.
    pub async fn run(
        &self,
        node_type: &str,
        ctx: &ExecutionContext,
        config: &Value,
    ) -> Result<NodeResult, EngineError> {
        let result = self.registry.dispatch(node_type, ctx, config).await?;

        if result.is_success() {
            if let (Some(updates), Some(storage)) =
                (&result.updated_memory, &ctx.services.storage)
            {
                apply_memory_updates(updates, storage.as_ref()).await?;
            }
        }

        Ok(result)
    }

    /// Resolve the downstream node ids a result routes to
    pub fn route(
        &self,
        result: &NodeResult,
        node_id: &str,
        connections: &ConnectionTable,
    ) -> Vec<String> {
        route_node_output(result, node_id, connections)
    }
}
