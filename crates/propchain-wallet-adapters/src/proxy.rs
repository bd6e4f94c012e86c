//! Native stand-in for `window.ethereum`: forwards EIP-1193 requests as
//! JSON-RPC 2.0 POSTs to a configured endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use propchain_wallet_core::{ProviderError, RpcMethod};

#[derive(Debug, Clone)]
pub struct ProxyRuntime {
    base_url: String,
    client: reqwest::Client,
    next_id: Arc<AtomicU64>,
}

impl ProxyRuntime {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        // every request runs on its own short-lived runtime, so pooled
        // connections would outlive the runtime that owns them
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| {
                ProviderError::message(format!("failed to build eip1193 proxy client: {e}"))
            })?;
        Ok(Self {
            base_url: base_url.into(),
            client,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Performs the call on a worker thread so the caller's executor (the UI
    /// thread's local pool) never blocks on network I/O.
    pub async fn request(&self, method: &RpcMethod) -> Result<Value, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method.name(),
            "params": method.params(),
        });
        let client = self.client.clone();
        let url = self.base_url.clone();
        let (tx, rx) = tokio::sync::oneshot::channel();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(post_json_rpc(&client, &url, &payload)),
                Err(e) => Err(ProviderError::message(format!(
                    "failed to start eip1193 proxy runtime: {e}"
                ))),
            };
            let _ = tx.send(outcome);
        });

        rx.await
            .map_err(|_| ProviderError::message("eip1193 proxy worker exited without a response"))?
    }
}

async fn post_json_rpc(
    client: &reqwest::Client,
    url: &str,
    payload: &Value,
) -> Result<Value, ProviderError> {
    debug!(%url, method = %payload["method"], "eip1193 proxy request");
    let response = client
        .post(url)
        .json(payload)
        .send()
        .await
        .map_err(|e| ProviderError::message(format!("eip1193 proxy request failed: {e}")))?;
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .map_err(|e| ProviderError::message(format!("eip1193 proxy json decode failed: {e}")))?;

    if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
        return Err(rpc_error(err));
    }
    if !status.is_success() {
        return Err(ProviderError::new(
            None,
            Some(format!("eip1193 proxy status {status}: {body}")),
        ));
    }
    body.get("result")
        .cloned()
        .ok_or_else(|| ProviderError::message("eip1193 proxy response missing result"))
}

/// JSON-RPC `error` object to the tagged provider failure.
pub(crate) fn rpc_error(err: &Value) -> ProviderError {
    ProviderError::new(
        err.get("code").and_then(Value::as_i64),
        err.get("message").and_then(Value::as_str).map(str::to_owned),
    )
}
