use crate::{ExecutionContext, NodeError, NodeResult, Value};
use async_trait::async_trait;

/// Pluggable handler implementing one node type's behavior.
///
/// Implementations must be stateless: a retried attempt replays the same
/// context and config verbatim, so nothing may be carried over from a
/// previous call. Returning `Err` is the "handler threw" path: the engine
/// catches it and surfaces an error result with code `EXEC_ERROR` rather
/// than letting it propagate.
///
/// The config value is assumed to already satisfy the node type's
/// `config_schema`; validation happens at the system boundary, not here.
#[async_trait]
pub trait NodeExecutor: Send + Sync {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        config: &Value,
    ) -> Result<NodeResult, NodeError>;
}
