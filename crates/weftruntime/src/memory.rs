use std::collections::BTreeMap;
use weftcore::{EngineError, Storage, Value};

/// Persist a successful result's proposed memory writes.
///
/// Writes go out strictly one at a time in key order, so a later write may
/// assume the earlier ones completed. On the first storage rejection the
/// error propagates and the remaining keys are never attempted. Keys already
/// written stay written: there is no rollback, the operation is not
/// transactional.
pub async fn apply_memory_updates(
    updates: &BTreeMap<String, Value>,
    storage: &dyn Storage,
) -> Result<(), EngineError> {
    for (key, value) in updates {
        storage
            .set(key, value.clone())
            .await
            .map_err(|source| EngineError::MemoryApply {
                key: key.clone(),
                source,
            })?;
        tracing::debug!(key = %key, "memory write applied");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use weftcore::ServiceError;

    /// Records `set` calls in order; rejects any key in `fail_on`
    struct RecordingStorage {
        writes: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    impl RecordingStorage {
        fn new(fail_on: Option<&str>) -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail_on: fail_on.map(String::from),
            }
        }
    }

    #[async_trait]
    impl Storage for RecordingStorage {
        async fn get(&self, _key: &str) -> Result<Option<Value>, ServiceError> {
            Ok(None)
        }

        async fn set(&self, key: &str, _value: Value) -> Result<(), ServiceError> {
            if self.fail_on.as_deref() == Some(key) {
                return Err(ServiceError::Storage(format!("rejected write to '{key}'")));
            }
            self.writes.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    fn updates() -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), Value::from(1));
        map.insert("b".to_string(), Value::from(2));
        map
    }

    #[tokio::test]
    async fn writes_each_key_once_in_order() {
        let storage = RecordingStorage::new(None);
        apply_memory_updates(&updates(), &storage).await.unwrap();

        let writes = storage.writes.lock().unwrap();
        assert_eq!(*writes, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn first_failure_stops_remaining_writes() {
        let storage = RecordingStorage::new(Some("a"));
        let err = apply_memory_updates(&updates(), &storage)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::MemoryApply { key, .. } if key == "a"));
        // "b" is never attempted after "a" rejects
        assert!(storage.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn applied_keys_survive_a_later_failure() {
        let storage = RecordingStorage::new(Some("b"));
        let err = apply_memory_updates(&updates(), &storage)
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::MemoryApply { key, .. } if key == "b"));
        // No rollback of "a"
        assert_eq!(*storage.writes.lock().unwrap(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn empty_updates_is_a_no_op() {
        let storage = RecordingStorage::new(None);
        apply_memory_updates(&BTreeMap::new(), &storage)
            .await
            .unwrap();
        assert!(storage.writes.lock().unwrap().is_empty());
    }
}
