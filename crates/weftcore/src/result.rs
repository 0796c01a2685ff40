use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default output port followed when a result names no port
pub const DEFAULT_OUTPUT_PORT: &str = "default";

/// Outcome status of one node attempt.
///
/// A genuine tri-state: `Retry` is a handler's explicit request for another
/// attempt, distinct from `Error`. Engine-detected failures (timeout, a
/// handler that raised) are reported as `Error` and are not re-attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Success,
    Error,
    Retry,
}

/// The single outcome shape every node handler produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeResult {
    pub status: NodeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Chosen output port; absent means `"default"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<NodeFailure>,

    /// Key/value writes to persist once the result is a success. Ordered
    /// map: the memory applier walks keys in this order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_memory: Option<BTreeMap<String, Value>>,
}

impl NodeResult {
    pub fn success() -> Self {
        Self {
            status: NodeStatus::Success,
            data: None,
            next: None,
            error: None,
            updated_memory: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: NodeStatus::Error,
            data: None,
            next: None,
            error: Some(NodeFailure {
                message: message.into(),
                code: code.into(),
                details: None,
            }),
            updated_memory: None,
        }
    }

    pub fn retry() -> Self {
        Self {
            status: NodeStatus::Retry,
            data: None,
            next: None,
            error: None,
            updated_memory: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_next(mut self, port: impl Into<String>) -> Self {
        self.next = Some(port.into());
        self
    }

    pub fn with_error_details(mut self, details: impl Into<Value>) -> Self {
        if let Some(failure) = self.error.as_mut() {
            failure.details = Some(details.into());
        }
        self
    }

    pub fn with_memory(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.updated_memory
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == NodeStatus::Success
    }

    /// The output port routing should follow for this result
    pub fn output_port(&self) -> &str {
        self.next.as_deref().unwrap_or(DEFAULT_OUTPUT_PORT)
    }
}

/// Error payload carried on an error-status result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeFailure {
    pub message: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Result code for an attempt that exceeded its time budget
pub const CODE_TIMEOUT: &str = "TIMEOUT";
/// Result code for a handler that raised instead of returning a result
pub const CODE_EXEC_ERROR: &str = "EXEC_ERROR";
/// Result code synthesized when retries are exhausted with nothing recorded
pub const CODE_MAX_RETRIES: &str = "MAX_RETRIES";
