//! EVM JSON-RPC provider — the chain connection the fetch flow calls
//! through.
//!
//! Constructed explicitly and injected into the client; its absence is a
//! defined precondition error, not a crash. Only the two read methods the
//! SDK needs are implemented.

use crate::error::RpcError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::AddressStr;

use async_lock::RwLock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

// ─── Provider ────────────────────────────────────────────────────────────────

/// JSON-RPC-over-HTTP provider for an EVM node.
#[derive(Debug)]
pub struct EvmProvider {
    url: String,
    client: Client,
    next_id: AtomicU64,
    /// A node's chain id never changes — cached after the first call.
    chain_id: RwLock<Option<u64>>,
}

impl EvmProvider {
    pub fn new(url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            url: url.to_string(),
            client,
            next_id: AtomicU64::new(1),
            chain_id: RwLock::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute a read-only contract call against the latest block.
    ///
    /// JSON-RPC error objects — including reverts — surface as
    /// [`RpcError::Rpc`] and are never retried; `policy` governs transport
    /// failures only.
    pub async fn eth_call(
        &self,
        to: &AddressStr,
        calldata: &[u8],
        policy: RetryPolicy,
    ) -> Result<Vec<u8>, RpcError> {
        let params = json!([
            { "to": to.as_str(), "data": format!("0x{}", hex::encode(calldata)) },
            "latest"
        ]);
        let result = self.request("eth_call", params, policy).await?;
        let text = result
            .as_str()
            .ok_or_else(|| RpcError::InvalidResponse("eth_call result is not a string".into()))?;
        crate::abi::decode_hex(text).map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }

    /// The node's chain id, cached after the first successful call.
    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        if let Some(id) = *self.chain_id.read().await {
            return Ok(id);
        }

        let result = self
            .request("eth_chainId", json!([]), RetryPolicy::Idempotent)
            .await?;
        let text = result.as_str().ok_or_else(|| {
            RpcError::InvalidResponse("eth_chainId result is not a string".into())
        })?;
        let id = parse_quantity(text)?;

        *self.chain_id.write().await = Some(id);
        Ok(id)
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn request(
        &self,
        method: &str,
        params: Value,
        policy: RetryPolicy,
    ) -> Result<Value, RpcError> {
        let config = match policy {
            RetryPolicy::None => return self.do_request(method, &params).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c,
        };

        let mut retry = 0;
        loop {
            match self.do_request(method, &params).await {
                Ok(v) => return Ok(v),
                Err(RpcError::Transport(e))
                    if retry < config.retries()
                        && (e.is_connect() || e.is_timeout() || e.is_request()) =>
                {
                    let delay = config.delay_for_retry(retry);
                    tracing::debug!(
                        method,
                        retry = retry + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying RPC request"
                    );
                    futures_timer::Delay::new(delay).await;
                    retry += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn do_request(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params: params.clone(),
        };

        let resp = self.client.post(&self.url).json(&body).send().await?;
        let parsed: RpcResponse = resp.json().await?;

        if let Some(err) = parsed.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        parsed
            .result
            .ok_or_else(|| RpcError::InvalidResponse("response has neither result nor error".into()))
    }
}

impl Clone for EvmProvider {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            client: self.client.clone(),
            next_id: AtomicU64::new(1),
            chain_id: RwLock::new(None),
        }
    }
}

/// Parse a JSON-RPC quantity (`"0x106a"`) into a `u64`.
fn parse_quantity(text: &str) -> Result<u64, RpcError> {
    let stripped = text.strip_prefix("0x").unwrap_or(text);
    u64::from_str_radix(stripped, 16)
        .map_err(|_| RpcError::InvalidResponse(format!("invalid quantity: {}", text)))
}
