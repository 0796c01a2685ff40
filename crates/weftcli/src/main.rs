use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use weftcore::{ExecutionContext, Services, TracingLogger, TriggerMeta, TriggerSource, Value};
use weftnodes::{HttpClient, InMemoryStorage};
use weftruntime::{ConnectionTable, NodeRegistry, NodeRuntime};

#[derive(Parser)]
#[command(name = "weft")]
#[command(about = "Run a single workflow node invocation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one node invocation described by a JSON file
    Run {
        /// Path to an invocation JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Payload override as a JSON string
        #[arg(short, long)]
        input: Option<String>,
    },

    /// List registered node types
    Nodes,

    /// Write a starter invocation file
    Init {
        #[arg(short, long, default_value = "invocation.json")]
        output: PathBuf,
    },
}

/// On-disk shape of one node invocation
#[derive(Debug, Deserialize)]
struct Invocation {
    node_type: String,
    #[serde(default)]
    workflow_id: Option<String>,
    #[serde(default)]
    node_id: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    config: serde_json::Value,
    #[serde(default)]
    payload: serde_json::Value,
    #[serde(default)]
    memory: HashMap<String, serde_json::Value>,
    /// Output port -> downstream connections, as the orchestrator would
    /// supply them
    #[serde(default)]
    connections: ConnectionTable,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut registry = NodeRegistry::new();
    weftnodes::register_all(&mut registry);

    match cli.command {
        Commands::Run { file, input } => run_invocation(registry, &file, input).await,
        Commands::Nodes => {
            let mut definitions = registry.definitions();
            definitions.sort_by(|a, b| a.id.cmp(&b.id));
            for def in definitions {
                println!("{:<16} {:<24} {:?}", def.id, def.label, def.category);
            }
            Ok(())
        }
        Commands::Init { output } => {
            let example = serde_json::json!({
                "node_type": "util.echo",
                "workflow_id": "wf-local",
                "node_id": "node-1",
                "config": {},
                "payload": { "x": 1 },
                "memory": {},
                "connections": {
                    "default": [ { "to_node": "node-2", "to_port": "in" } ]
                }
            });
            std::fs::write(&output, serde_json::to_string_pretty(&example)?)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("wrote {}", output.display());
            Ok(())
        }
    }
}

async fn run_invocation(
    registry: NodeRegistry,
    file: &PathBuf,
    input: Option<String>,
) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let invocation: Invocation =
        serde_json::from_str(&raw).context("invalid invocation file")?;

    let payload = match input {
        Some(json) => serde_json::from_str(&json).context("invalid --input JSON")?,
        None => invocation.payload,
    };

    let services = Services::new(Arc::new(TracingLogger))
        .with_storage(Arc::new(InMemoryStorage::new()))
        .with_http(Arc::new(HttpClient::new()));

    let memory: HashMap<String, Value> = invocation
        .memory
        .into_iter()
        .map(|(k, v)| (k, Value::from(v)))
        .collect();

    let execution_id = uuid::Uuid::new_v4().to_string();
    let node_id = invocation.node_id.unwrap_or_else(|| "node-1".to_string());
    let ctx = ExecutionContext::builder(
        invocation.workflow_id.unwrap_or_else(|| "wf-local".to_string()),
        execution_id,
        node_id.clone(),
    )
    .payload(Value::from(payload))
    .memory(memory)
    .meta(TriggerMeta::from_source(TriggerSource::Manual))
    .services(services);

    let ctx = match invocation.user_id {
        Some(user_id) => ctx.user_id(user_id).build(),
        None => ctx.build(),
    };

    let runtime = NodeRuntime::new(Arc::new(registry));
    let result = runtime
        .run(&invocation.node_type, &ctx, &Value::from(invocation.config))
        .await?;

    let targets = runtime.route(&result, &node_id, &invocation.connections);

    println!("{}", serde_json::to_string_pretty(&result)?);
    if !targets.is_empty() {
        println!("next: {}", targets.join(", "));
    }
    Ok(())
}
