//! Production [`ChainClient`] over JSON-RPC.

use std::time::Duration;

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use jsonrpsee::core::client::{ClientT, Error as ClientError};
use jsonrpsee::core::params::ArrayParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::types::ErrorObjectOwned;
use serde::Serialize;
use tracing::trace;

use super::client::{CallError, ChainClient, RevertError};

/// JSON-RPC error code geth-compatible nodes use for execution reverts.
const EXECUTION_REVERTED_CODE: i32 = 3;

/// `eth_call` request object.
#[derive(Debug, Serialize)]
struct CallRequest {
    to: Address,
    data: Bytes,
}

/// [`ChainClient`] backed by an HTTP JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcChainClient {
    client: HttpClient,
    url: String,
}

impl RpcChainClient {
    /// Connect to `url`; every request is bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CallError> {
        let url = url.into();
        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(&url)
            .map_err(|e| CallError::Transport(format!("failed to create RPC client for {url}: {e}")))?;
        Ok(Self { client, url })
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, CallError> {
        trace!(target: "summon::rpc", %to, len = input.len(), "eth_call");

        let serialize_err =
            |e: serde_json::Error| CallError::Transport(format!("failed to serialize eth_call params: {e}"));
        let mut params = ArrayParams::new();
        params.insert(CallRequest { to, data: input }).map_err(serialize_err)?;
        params.insert("latest").map_err(serialize_err)?;

        self.client
            .request::<Bytes, _>("eth_call", params)
            .await
            .map_err(classify_error)
    }
}

/// Split node errors into reverts and everything else.
fn classify_error(err: ClientError) -> CallError {
    match err {
        ClientError::Call(obj) if is_revert(&obj) => CallError::Revert(revert_from_error_object(&obj)),
        other => CallError::Transport(other.to_string()),
    }
}

fn is_revert(obj: &ErrorObjectOwned) -> bool {
    obj.code() == EXECUTION_REVERTED_CODE || obj.message().to_ascii_lowercase().contains("revert")
}

/// Revert data is carried in the error's `data` field as a hex string.
fn revert_from_error_object(obj: &ErrorObjectOwned) -> RevertError {
    let data = obj
        .data()
        .and_then(|raw| serde_json::from_str::<Bytes>(raw.get()).ok())
        .unwrap_or_default();
    RevertError { data, message: obj.message().to_owned() }
}
