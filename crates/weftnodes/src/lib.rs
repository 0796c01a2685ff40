//! Built-in node library
//!
//! Concrete node types shipped with the runtime, plus reference
//! implementations of the optional service capabilities.

mod ai;
mod http;
mod memory;
mod services;
mod time;
mod util;

pub use ai::ChatExecutor;
pub use http::HttpRequestExecutor;
pub use memory::MemorySetExecutor;
pub use services::{HttpClient, InMemoryStorage};
pub use time::DelayExecutor;
pub use util::{EchoExecutor, LogExecutor};

use std::sync::Arc;
use weftruntime::NodeRegistry;

/// Register every built-in node type with a registry
pub fn register_all(registry: &mut NodeRegistry) {
    registry.register(util::echo_definition(), Arc::new(EchoExecutor));
    registry.register(util::log_definition(), Arc::new(LogExecutor));
    registry.register(time::delay_definition(), Arc::new(DelayExecutor));
    registry.register(http::http_request_definition(), Arc::new(HttpRequestExecutor));
    registry.register(memory::memory_set_definition(), Arc::new(MemorySetExecutor));
    registry.register(ai::chat_definition(), Arc::new(ChatExecutor));
}
