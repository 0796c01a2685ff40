use crate::executor::execute_with_retry;
use std::collections::HashMap;
use std::sync::Arc;
use weftcore::{
    EngineError, ExecutionContext, NodeCategory, NodeExecutor, NodeResult, NodeTypeDefinition,
    Value,
};

/// In-memory catalog mapping a node-type id to its definition and executor.
///
/// Registration happens at startup through `&mut self`; after the registry
/// is shared (typically behind an `Arc`) it is read-only, so dispatch needs
/// no lock. Each id maps to exactly one (definition, executor) pair.
pub struct NodeRegistry {
    entries: HashMap<String, RegistryEntry>,
}

struct RegistryEntry {
    definition: Arc<NodeTypeDefinition>,
    executor: Arc<dyn NodeExecutor>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a node type. Duplicate ids are last-write-wins; the
    /// overwrite is logged so a double registration is visible rather than
    /// silent.
    pub fn register(&mut self, definition: NodeTypeDefinition, executor: Arc<dyn NodeExecutor>) {
        let id = definition.id.clone();
        if self.entries.contains_key(&id) {
            tracing::warn!("re-registering node type '{}', previous entry replaced", id);
        } else {
            tracing::info!("registering node type: {}", id);
        }
        self.entries.insert(
            id,
            RegistryEntry {
                definition: Arc::new(definition),
                executor,
            },
        );
    }

    /// Look up a definition by node-type id
    pub fn lookup(&self, id: &str) -> Option<Arc<NodeTypeDefinition>> {
        self.entries.get(id).map(|e| Arc::clone(&e.definition))
    }

    /// Execute a node type under its registered policy (timeout + retry).
    ///
    /// An unregistered id is a configuration error and fails fast; it is
    /// never swallowed into a success-shaped result. For a registered id
    /// every handler-level failure comes back as an `Ok(NodeResult)`.
    pub async fn dispatch(
        &self,
        id: &str,
        ctx: &ExecutionContext,
        config: &Value,
    ) -> Result<NodeResult, EngineError> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| EngineError::UnknownNodeType(id.to_string()))?;

        Ok(execute_with_retry(
            Arc::clone(&entry.executor),
            &entry.definition,
            ctx,
            config,
        )
        .await)
    }

    /// All registered node-type ids, sorted for stable output
    pub fn node_types(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// All registered definitions
    pub fn definitions(&self) -> Vec<Arc<NodeTypeDefinition>> {
        self.entries
            .values()
            .map(|e| Arc::clone(&e.definition))
            .collect()
    }

    /// Definitions in one palette category
    pub fn definitions_in(&self, category: NodeCategory) -> Vec<Arc<NodeTypeDefinition>> {
        self.entries
            .values()
            .filter(|e| e.definition.category == category)
            .map(|e| Arc::clone(&e.definition))
            .collect()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
