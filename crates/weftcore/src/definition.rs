use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity and policy for one kind of workflow step.
///
/// Immutable once registered: the registry hands out `Arc`s and never
/// mutates an entry in place. Only the `runtime` policy fields are expected
/// to vary meaningfully between node types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTypeDefinition {
    /// Globally unique type identifier (e.g., "http.request", "ai.chat")
    pub id: String,
    pub version: String,
    pub label: String,
    pub description: String,
    pub category: NodeCategory,

    /// Structural schema for valid config. Stored opaquely; validation is
    /// the caller's job before dispatch, the runtime never enforces it.
    pub config_schema: Value,

    pub inputs: HashMap<String, InputPort>,
    pub outputs: HashMap<String, OutputPort>,
    pub runtime: RuntimePolicy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityPolicy>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<String>,
}

impl NodeTypeDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            id: id.into(),
            version: "1.0.0".to_string(),
            label: label.into(),
            description: String::new(),
            category,
            config_schema: Value::Null,
            inputs: HashMap::new(),
            outputs: HashMap::new(),
            runtime: RuntimePolicy::default(),
            security: None,
            meta: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_config_schema(mut self, schema: Value) -> Self {
        self.config_schema = schema;
        self
    }

    pub fn with_input(
        mut self,
        name: impl Into<String>,
        data_type: impl Into<String>,
        required: bool,
    ) -> Self {
        self.inputs.insert(
            name.into(),
            InputPort {
                data_type: data_type.into(),
                required,
                description: String::new(),
            },
        );
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        self.outputs.insert(
            name.into(),
            OutputPort {
                data_type: data_type.into(),
                description: String::new(),
            },
        );
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.runtime.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, count: u32, backoff_ms: u64) -> Self {
        self.runtime.retry = Some(RetryPolicy { count, backoff_ms });
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.meta.push(tag.into());
        self
    }
}

/// Closed set of palette categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Trigger,
    Action,
    Logic,
    Ai,
    Memory,
    Integration,
    Utility,
}

/// Named input port with a semantic type tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputPort {
    pub data_type: String,
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// Named output port with a semantic type tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputPort {
    pub data_type: String,
    #[serde(default)]
    pub description: String,
}

/// Execution policy: how long one attempt may run and whether the engine
/// re-attempts when the handler asks for a retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimePolicy {
    pub timeout_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryPolicy>,
}

impl Default for RuntimePolicy {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            retry: None,
        }
    }
}

/// Fixed-delay retry policy. `backoff_ms` is the flat sleep between
/// attempts; there is no exponential growth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub count: u32,
    pub backoff_ms: u64,
}

/// Optional security descriptor carried on a definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityPolicy {
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}
