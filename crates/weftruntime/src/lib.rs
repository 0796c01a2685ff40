//! Node execution engine
//!
//! This crate runs exactly one node per call: it resolves the node type
//! from the registry, races the handler against its timeout, applies the
//! bounded retry policy, routes the chosen output port to downstream node
//! ids, and persists proposed memory writes. Sequencing a whole workflow
//! graph belongs to the orchestrator above it.

mod executor;
mod memory;
mod registry;
mod router;
mod runtime;

pub use executor::{execute_with_retry, execute_with_timeout};
pub use memory::apply_memory_updates;
pub use registry::NodeRegistry;
pub use router::{route_node_output, Connection, ConnectionTable};
pub use runtime::NodeRuntime;
