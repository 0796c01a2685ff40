use thiserror::Error;

/// Faults that propagate to the caller instead of becoming a `NodeResult`.
///
/// Only two classes of failure escape the engine: dispatching an id nobody
/// registered (a configuration bug) and a storage rejection while persisting
/// proposed memory writes. Everything a handler does wrong is normalized
/// into an error-status `NodeResult` instead.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("memory write failed for key '{key}': {source}")]
    MemoryApply {
        key: String,
        #[source]
        source: ServiceError,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors a node executor may raise instead of returning a `NodeResult`.
///
/// The engine treats any of these as the "handler threw" path: caught,
/// logged, and surfaced as an error result with code `EXEC_ERROR`.
#[derive(Error, Debug, Clone)]
pub enum NodeError {
    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    #[error("cancelled")]
    Cancelled,
}

/// Failures reported by the external service capabilities
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("llm error: {0}")]
    Llm(String),

    #[error("messaging error: {0}")]
    Messaging(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}
