use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use weftcore::NodeResult;

/// Outgoing edges of one node, keyed by output port name.
///
/// Supplied per node by the graph orchestrator; this runtime never walks
/// the whole workflow graph itself.
pub type ConnectionTable = HashMap<String, Vec<Connection>>;

/// One edge from an output port to a downstream node's input port
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub to_node: String,
    pub to_port: String,
}

impl Connection {
    pub fn new(to_node: impl Into<String>, to_port: impl Into<String>) -> Self {
        Self {
            to_node: to_node.into(),
            to_port: to_port.into(),
        }
    }
}

/// Resolve which downstream nodes a result's chosen output port leads to.
///
/// A port with no connections is a dead-end branch, not an error: the
/// returned list is simply empty and the orchestrator stops that path.
pub fn route_node_output(
    result: &NodeResult,
    node_id: &str,
    connections: &ConnectionTable,
) -> Vec<String> {
    let port = result.output_port();
    let targets: Vec<String> = connections
        .get(port)
        .map(|edges| edges.iter().map(|c| c.to_node.clone()).collect())
        .unwrap_or_default();

    tracing::debug!(
        node_id = %node_id,
        port = %port,
        "routed to {} downstream node(s)",
        targets.len()
    );
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ConnectionTable {
        let mut table = ConnectionTable::new();
        table.insert(
            "default".to_string(),
            vec![
                Connection::new("node-b", "in"),
                Connection::new("node-c", "in"),
            ],
        );
        table.insert("error".to_string(), vec![Connection::new("node-err", "in")]);
        table
    }

    #[test]
    fn routes_default_port_when_next_is_absent() {
        let result = NodeResult::success();
        let targets = route_node_output(&result, "node-a", &table());
        assert_eq!(targets, vec!["node-b".to_string(), "node-c".to_string()]);
    }

    #[test]
    fn routes_chosen_port() {
        let result = NodeResult::error("E", "failed").with_next("error");
        let targets = route_node_output(&result, "node-a", &table());
        assert_eq!(targets, vec!["node-err".to_string()]);
    }

    #[test]
    fn unknown_port_is_a_dead_end_not_an_error() {
        let result = NodeResult::success().with_next("alertPath");
        let targets = route_node_output(&result, "node-a", &table());
        assert!(targets.is_empty());
    }

    #[test]
    fn empty_table_routes_nowhere() {
        let result = NodeResult::success();
        let targets = route_node_output(&result, "node-a", &ConnectionTable::new());
        assert!(targets.is_empty());
    }
}
