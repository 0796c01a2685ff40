//! Core contract for the node execution runtime
//!
//! This crate provides the data shapes shared by every other component:
//! node type definitions, the execution context, the uniform result shape,
//! the services surface, and the error taxonomy. It contains no execution
//! logic of its own.

mod context;
mod definition;
mod error;
mod executor;
mod result;
mod services;
mod value;

pub use context::{ContextBuilder, ExecutionContext, TriggerMeta, TriggerSource};
pub use definition::{
    InputPort, NodeCategory, NodeTypeDefinition, OutputPort, RetryPolicy, RuntimePolicy,
    SecurityPolicy,
};
pub use error::{EngineError, NodeError, ServiceError};
pub use executor::NodeExecutor;
pub use result::{
    NodeFailure, NodeResult, NodeStatus, CODE_EXEC_ERROR, CODE_MAX_RETRIES, CODE_TIMEOUT,
    DEFAULT_OUTPUT_PORT,
};
pub use services::{
    ChatMessage, ChatOptions, HttpService, LlmService, Logger, Messenger, Services, Storage,
    TracingLogger,
};
pub use value::Value;

/// Result type for engine-level operations
pub type Result<T> = std::result::Result<T, EngineError>;
