// End-to-end engine tests: register, dispatch, route, persist

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use weftcore::{
    ExecutionContext, NodeCategory, NodeError, NodeExecutor, NodeResult, NodeStatus,
    NodeTypeDefinition, ServiceError, Services, Storage, TracingLogger, Value,
};
use weftruntime::{Connection, ConnectionTable, NodeRegistry, NodeRuntime};

/// Echoes the invocation payload back as result data
struct EchoExecutor;

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

/// Succeeds and proposes two memory writes
struct RememberExecutor;

#[async_trait]
impl NodeExecutor for RememberExecutor {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        _config: &Value,
    ) -> Result<NodeResult, NodeError> {
        Ok(NodeResult::success()
            .with_memory("last_payload", ctx.payload.clone())
            .with_memory("seen", true))
    }
}

struct MapStorage {
    entries: Mutex<HashMap<String, Value>>,
}

impl MapStorage {
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Storage for MapStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

fn echo_definition() -> NodeTypeDefinition {
    NodeTypeDefinition::new("util.echo", "Echo", NodeCategory::Utility)
        .with_description("Returns its payload unchanged")
        .with_output("default", "json")
        .with_timeout_ms(1_000)
}

#[tokio::test]
async fn echo_dispatch_end_to_end() {
    let mut registry = NodeRegistry::new();
    registry.register(echo_definition(), Arc::new(EchoExecutor));
    let runtime = NodeRuntime::new(Arc::new(registry));

    let payload = Value::from(serde_json::json!({ "x": 1.0 }));
    let ctx = ExecutionContext::builder("wf-1", "exec-1", "node-echo")
        .payload(payload.clone())
        .build();

    let result = runtime.run("util.echo", &ctx, &Value::Null).await.unwrap();

    assert_eq!(result.status, NodeStatus::Success);
    assert_eq!(result.data, Some(payload));
    assert_eq!(result.output_port(), "default");
}

#[tokio::test]
async fn successful_result_routes_to_downstream_nodes() {
    let mut registry = NodeRegistry::new();
    registry.register(echo_definition(), Arc::new(EchoExecutor));
    let runtime = NodeRuntime::new(Arc::new(registry));

    let ctx = ExecutionContext::builder("wf-1", "exec-2", "node-echo").build();
    let result = runtime.run("util.echo", &ctx, &Value::Null).await.unwrap();

    let mut table = ConnectionTable::new();
    table.insert(
        "default".to_string(),
        vec![Connection::new("node-next", "in")],
    );

    let targets = runtime.route(&result, &ctx.node_id, &table);
    assert_eq!(targets, vec!["node-next".to_string()]);
}

#[tokio::test]
async fn success_persists_proposed_memory_writes() {
    let mut registry = NodeRegistry::new();
    registry.register(
        NodeTypeDefinition::new("memory.remember", "Remember", NodeCategory::Memory)
            .with_timeout_ms(1_000),
        Arc::new(RememberExecutor),
    );
    let runtime = NodeRuntime::new(Arc::new(registry));

    let storage = Arc::new(MapStorage::new());
    let services =
        Services::new(Arc::new(TracingLogger)).with_storage(Arc::clone(&storage) as Arc<dyn Storage>);

    let ctx = ExecutionContext::builder("wf-1", "exec-3", "node-mem")
        .payload("hello")
        .services(services)
        .build();

    let result = runtime
        .run("memory.remember", &ctx, &Value::Null)
        .await
        .unwrap();

    assert!(result.is_success());
    let entries = storage.entries.lock().unwrap();
    assert_eq!(entries.get("last_payload"), Some(&Value::from("hello")));
    assert_eq!(entries.get("seen"), Some(&Value::from(true)));
}

#[tokio::test]
async fn memory_is_not_persisted_without_a_storage_service() {
    let mut registry = NodeRegistry::new();
    registry.register(
        NodeTypeDefinition::new("memory.remember", "Remember", NodeCategory::Memory)
            .with_timeout_ms(1_000),
        Arc::new(RememberExecutor),
    );
    let runtime = NodeRuntime::new(Arc::new(registry));

    // No storage service on the context: run still succeeds, writes stay
    // proposed on the result only.
    let ctx = ExecutionContext::builder("wf-1", "exec-4", "node-mem").build();
    let result = runtime
        .run("memory.remember", &ctx, &Value::Null)
        .await
        .unwrap();

    assert!(result.is_success());
    let updates: &BTreeMap<String, Value> = result.updated_memory.as_ref().unwrap();
    assert_eq!(updates.len(), 2);
}

#[tokio::test]
async fn unknown_node_type_propagates_from_the_facade() {
    let runtime = NodeRuntime::new(Arc::new(NodeRegistry::new()));
    let ctx = ExecutionContext::builder("wf-1", "exec-5", "node-x").build();

    let err = runtime.run("ghost.node", &ctx, &Value::Null).await;
    assert!(err.is_err());
}
