use crate::{Services, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Everything a node handler sees for one logical invocation.
///
/// Built once by the caller and reused (cloned) across retry attempts:
/// attempts of the same invocation share one `execution_id` but stay
/// distinguishable in logs through `run_id`. Discarded once a terminal
/// result is produced.
#[derive(Clone)]
pub struct ExecutionContext {
    pub workflow_id: String,
    pub execution_id: String,
    pub node_id: String,
    /// Log-correlation id derived from `execution_id` plus a high-resolution
    /// timestamp at build time
    pub run_id: String,
    pub user_id: Option<String>,

    pub payload: Value,
    /// Shared mutable state visible to this node, owned by external storage
    pub memory: HashMap<String, Value>,
    /// Per-run ephemeral values
    pub vars: HashMap<String, Value>,
    pub meta: TriggerMeta,
    pub services: Services,

    /// Cooperative cancellation. The engine never forces this on timeout; a
    /// handler that wants to stop early must observe it itself.
    pub abort: CancellationToken,
}

impl ExecutionContext {
    pub fn builder(
        workflow_id: impl Into<String>,
        execution_id: impl Into<String>,
        node_id: impl Into<String>,
    ) -> ContextBuilder {
        ContextBuilder {
            workflow_id: workflow_id.into(),
            execution_id: execution_id.into(),
            node_id: node_id.into(),
            user_id: None,
            payload: Value::Null,
            memory: HashMap::new(),
            vars: HashMap::new(),
            meta: TriggerMeta::manual(),
            services: Services::default(),
            abort: CancellationToken::new(),
        }
    }

    /// Read a shared memory entry carried into this invocation
    pub fn memory_get(&self, key: &str) -> Option<&Value> {
        self.memory.get(key)
    }

    pub fn var(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("workflow_id", &self.workflow_id)
            .field("execution_id", &self.execution_id)
            .field("node_id", &self.node_id)
            .field("run_id", &self.run_id)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Builder assembling a fully-populated context for one invocation
pub struct ContextBuilder {
    workflow_id: String,
    execution_id: String,
    node_id: String,
    user_id: Option<String>,
    payload: Value,
    memory: HashMap<String, Value>,
    vars: HashMap<String, Value>,
    meta: TriggerMeta,
    services: Services,
    abort: CancellationToken,
}

impl ContextBuilder {
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn memory(mut self, memory: HashMap<String, Value>) -> Self {
        self.memory = memory;
        self
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn vars(mut self, vars: HashMap<String, Value>) -> Self {
        self.vars = vars;
        self
    }

    pub fn meta(mut self, meta: TriggerMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    pub fn abort(mut self, token: CancellationToken) -> Self {
        self.abort = token;
        self
    }

    pub fn build(self) -> ExecutionContext {
        let run_id = derive_run_id(&self.execution_id);
        ExecutionContext {
            workflow_id: self.workflow_id,
            execution_id: self.execution_id,
            node_id: self.node_id,
            run_id,
            user_id: self.user_id,
            payload: self.payload,
            memory: self.memory,
            vars: self.vars,
            meta: self.meta,
            services: self.services,
            abort: self.abort,
        }
    }
}

fn derive_run_id(execution_id: &str) -> String {
    format!("{}:{}", execution_id, Utc::now().timestamp_micros())
}

/// How and when this invocation was triggered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerMeta {
    pub source: TriggerSource,
    pub timestamp: DateTime<Utc>,
    /// Raw provider payload, when the trigger carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl TriggerMeta {
    pub fn manual() -> Self {
        Self {
            source: TriggerSource::Manual,
            timestamp: Utc::now(),
            raw: None,
        }
    }

    pub fn from_source(source: TriggerSource) -> Self {
        Self {
            source,
            timestamp: Utc::now(),
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: impl Into<Value>) -> Self {
        self.raw = Some(raw.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerSource {
    Manual,
    Webhook,
    Schedule,
    Message,
    Api,
}
