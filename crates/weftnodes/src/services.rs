use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use weftcore::{HttpService, ServiceError, Storage, Value};

/// Process-local storage backend, handy for tests and single-process runs.
///
/// Matches the storage contract only; durability and per-key serialization
/// across processes are the real backend's problem.
pub struct InMemoryStorage {
    entries: Mutex<HashMap<String, Value>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, ServiceError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ServiceError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// reqwest-backed implementation of the HTTP capability
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpService for HttpClient {
    async fn get(&self, url: &str) -> Result<Value, ServiceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Http(format!("request failed: {e}")))?;

        read_json_body(response).await
    }

    async fn post(&self, url: &str, body: Value) -> Result<Value, ServiceError> {
        let response = self
            .client
            .post(url)
            .json(&serde_json::Value::from(body))
            .send()
            .await
            .map_err(|e| ServiceError::Http(format!("request failed: {e}")))?;

        read_json_body(response).await
    }
}

/// Status check comes first so a plain-text or HTML error page reports the
/// status instead of a JSON parse failure
async fn read_json_body(response: reqwest::Response) -> Result<Value, ServiceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Http(format!("status {status}: {body}")));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| ServiceError::Http(format!("invalid response body: {e}")))?;
    Ok(Value::from(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn storage_set_then_get() {
        let storage = InMemoryStorage::new();
        storage.set("k", Value::from("v")).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some(Value::from("v")));
        assert_eq!(storage.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn storage_overwrites_existing_key() {
        let storage = InMemoryStorage::new();
        storage.set("k", Value::from(1)).await.unwrap();
        storage.set("k", Value::from(2)).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some(Value::from(2.0)));
    }

    #[tokio::test]
    async fn non_json_error_body_reports_the_status() {
        let response = http::Response::builder()
            .status(404)
            .body("<html>not found</html>")
            .unwrap();

        let err = read_json_body(reqwest::Response::from(response))
            .await
            .unwrap_err();
        match err {
            ServiceError::Http(msg) => {
                assert!(msg.contains("404"));
                assert!(msg.contains("not found"));
            }
            other => panic!("expected http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_json_body_is_parsed() {
        let response = http::Response::builder()
            .status(200)
            .body(r#"{"ok":true}"#)
            .unwrap();

        let value = read_json_body(reqwest::Response::from(response))
            .await
            .unwrap();
        assert_eq!(value.get("ok").and_then(Value::as_bool), Some(true));
    }
}
