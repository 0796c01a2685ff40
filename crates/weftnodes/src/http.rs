use async_trait::async_trait;
use weftcore::{
    ExecutionContext, NodeCategory, NodeError, NodeExecutor, NodeResult, NodeTypeDefinition, Value,
};

/// Calls an external HTTP endpoint through the `http` service capability.
///
/// A failed request is an ordinary node outcome, not a raised error: it
/// comes back as an error result with code `HTTP_ERROR` routed to the
/// `error` port so a workflow can branch on it.
pub struct HttpRequestExecutor;

pub fn http_request_definition() -> NodeTypeDefinition {
    NodeTypeDefinition::new("http.request", "HTTP Request", NodeCategory::Integration)
        .with_description("Issue a GET or POST request against an external API")
        .with_config_schema(Value::from(serde_json::json!({
            "type": "object",
            "required": ["url"],
            "properties": {
                "url": { "type": "string" },
                "method": { "enum": ["GET", "POST"] },
                "body": {}
            }
        })))
        .with_input("body", "json", false)
        .with_output("default", "json")
        .with_output("error", "json")
        .with_timeout_ms(15_000)
        .with_retry(0, 0)
        .with_tag("network")
}

#[async_trait]
impl NodeExecutor for HttpRequestExecutor {
    async fn execute(
        &self,
        ctx: &ExecutionContext,
        config: &Value,
    ) -> Result<NodeResult, NodeError> {
        let url = config
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| NodeError::InvalidConfig("missing 'url'".to_string()))?;
        let method = config
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or("GET")
            .to_uppercase();

        let http = ctx.services.http.as_ref().ok_or_else(|| {
            NodeError::InvalidConfig("no http service available on this context".to_string())
        })?;

        ctx.services.logger.info(&format!("{method} {url}"));

        let response = match method.as_str() {
            "GET" => http.get(url).await,
            "POST" => {
                let body = config
                    .get("body")
                    .cloned()
                    .unwrap_or_else(|| ctx.payload.clone());
                http.post(url, body).await
            }
            other => {
                return Err(NodeError::InvalidConfig(format!(
                    "unsupported method: {other}"
                )))
            }
        };

        match response {
            Ok(body) => Ok(NodeResult::success().with_data(body)),
            Err(err) => Ok(NodeResult::error("HTTP_ERROR", err.to_string()).with_next("error")),
        }
    }
}
