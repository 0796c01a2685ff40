use crate::{ServiceError, Value};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Capability bundle reachable from an execution context.
///
/// The runtime only ever calls through these traits; it implements none of
/// them. A logger is always present, everything else is optional and
/// supplied by the composing application.
#[derive(Clone)]
pub struct Services {
    pub logger: Arc<dyn Logger>,
    pub llm: Option<Arc<dyn LlmService>>,
    pub storage: Option<Arc<dyn Storage>>,
    pub http: Option<Arc<dyn HttpService>>,
    pub messenger: Option<Arc<dyn Messenger>>,
}

impl Services {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            llm: None,
            storage: None,
            http: None,
            messenger: None,
        }
    }

    pub fn with_llm(mut self, llm: Arc<dyn LlmService>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_http(mut self, http: Arc<dyn HttpService>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn with_messenger(mut self, messenger: Arc<dyn Messenger>) -> Self {
        self.messenger = Some(messenger);
        self
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("llm", &self.llm.is_some())
            .field("storage", &self.storage.is_some())
            .field("http", &self.http.is_some())
            .field("messenger", &self.messenger.is_some())
            .finish()
    }
}

/// Structured logging surface handed to every node
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default logger that forwards to the `tracing` subscriber
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "weft::node", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "weft::node", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "weft::node", "{message}");
    }
}

/// One turn of an LLM conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Options passed through to an LLM chat call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[async_trait]
pub trait LlmService: Send + Sync {
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: ChatOptions,
    ) -> Result<String, ServiceError>;
}

/// Externally-owned keyed memory shared across node invocations
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait HttpService: Send + Sync {
    async fn get(&self, url: &str) -> Result<Value, ServiceError>;
    async fn post(&self, url: &str, body: Value) -> Result<Value, ServiceError>;
}

/// Outbound messaging (chat platforms, notifications)
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(
        &self,
        channel: &str,
        user_id: Option<&str>,
        message: &str,
        opts: Value,
    ) -> Result<(), ServiceError>;
}
