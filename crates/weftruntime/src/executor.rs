use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};
use weftcore::{
    ExecutionContext, NodeExecutor, NodeResult, NodeStatus, NodeTypeDefinition, Value,
    CODE_EXEC_ERROR, CODE_MAX_RETRIES, CODE_TIMEOUT,
};

/// Backoff applied between retry attempts when the policy names none
const DEFAULT_BACKOFF_MS: u64 = 1000;

/// Race one handler call against its time budget.
///
/// Always resolves to a `NodeResult`; the caller never sees a Rust error
/// from a handler. The handler runs as a detached task, so when the timer
/// wins the call is *not* cancelled and may keep executing after its
/// result is discarded. Handlers that mutate external state must be
/// idempotent or observe `ctx.abort` themselves.
pub async fn execute_with_timeout(
    executor: Arc<dyn NodeExecutor>,
    ctx: &ExecutionContext,
    config: &Value,
    timeout_ms: u64,
) -> NodeResult {
    let task_ctx = ctx.clone();
    let task_config = config.clone();
    let handle =
        tokio::spawn(async move { executor.execute(&task_ctx, &task_config).await });

    match timeout(Duration::from_millis(timeout_ms), handle).await {
        Ok(Ok(Ok(result))) => result,
        Ok(Ok(Err(err))) => {
            tracing::warn!(
                run_id = %ctx.run_id,
                node_id = %ctx.node_id,
                "node handler raised: {err}"
            );
            NodeResult::error(CODE_EXEC_ERROR, err.to_string())
        }
        Ok(Err(join_err)) => {
            tracing::error!(
                run_id = %ctx.run_id,
                node_id = %ctx.node_id,
                "node handler panicked: {join_err}"
            );
            NodeResult::error(CODE_EXEC_ERROR, format!("handler panicked: {join_err}"))
        }
        Err(_) => {
            tracing::warn!(
                run_id = %ctx.run_id,
                node_id = %ctx.node_id,
                "node execution exceeded {timeout_ms}ms, result discarded"
            );
            NodeResult::error(
                CODE_TIMEOUT,
                format!("node execution exceeded {timeout_ms}ms"),
            )
        }
    }
}

/// Run a node under its definition's retry policy.
///
/// At most `retry.count + 1` strictly sequential attempts. Only an explicit
/// `Retry` status continues the loop. Ordinary error results, timeouts and
/// raised handlers included, return immediately and are never re-attempted.
/// A fixed `backoff_ms` sleep separates attempts, never trailing the last.
pub async fn execute_with_retry(
    executor: Arc<dyn NodeExecutor>,
    definition: &NodeTypeDefinition,
    ctx: &ExecutionContext,
    config: &Value,
) -> NodeResult {
    let policy = &definition.runtime;
    let max_retries = policy.retry.map(|r| r.count).unwrap_or(0);
    let backoff_ms = policy
        .retry
        .map(|r| r.backoff_ms)
        .unwrap_or(DEFAULT_BACKOFF_MS);

    let mut last_result = None;

    for attempt in 0..=max_retries {
        tracing::debug!(
            run_id = %ctx.run_id,
            node_type = %definition.id,
            "attempt {}/{}",
            attempt + 1,
            max_retries + 1
        );

        let result =
            execute_with_timeout(Arc::clone(&executor), ctx, config, policy.timeout_ms).await;

        if result.status != NodeStatus::Retry {
            return result;
        }

        last_result = Some(result);

        if attempt < max_retries {
            sleep(Duration::from_millis(backoff_ms)).await;
        }
    }

    // Exhausted: hand back the last retry-status result verbatim. The
    // synthesized fallback only covers a policy with zero total attempts.
    last_result.unwrap_or_else(|| {
        NodeResult::error(
            CODE_MAX_RETRIES,
            format!("node '{}' exhausted its retry budget", definition.id),
        )
    })
}
