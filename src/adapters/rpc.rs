//! Sui RPC Balance Oracle
//!
//! `BalanceOracle` implementation over the fullnode JSON-RPC API
//! (`suix_getBalance`). Read-only; failures surface as
//! `RemoteCallFailure` and are handled by the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::TESTNET_RPC_URL;
use crate::domain::errors::WalletError;
use crate::ports::oracle::BalanceOracle;

pub struct SuiBalanceOracle {
    client: reqwest::Client,
    rpc_url: String,
}

impl SuiBalanceOracle {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
        }
    }

    pub fn testnet() -> Self {
        Self::new(TESTNET_RPC_URL)
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u32,
    method: &'static str,
    params: [&'a str; 1],
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<BalanceResult>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceResult {
    /// Total balance in base units, serialized as a decimal string.
    total_balance: String,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[async_trait]
impl BalanceOracle for SuiBalanceOracle {
    async fn get_balance(&self, address: &str) -> Result<u64, WalletError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "suix_getBalance",
            params: [address],
        };

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WalletError::RemoteCallFailure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WalletError::RemoteCallFailure(format!(
                "balance query returned HTTP {}",
                response.status()
            )));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::RemoteCallFailure(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(WalletError::RemoteCallFailure(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        let result = body
            .result
            .ok_or_else(|| WalletError::RemoteCallFailure("empty RPC result".to_string()))?;

        result.total_balance.parse::<u64>().map_err(|e| {
            WalletError::RemoteCallFailure(format!(
                "invalid totalBalance {:?}: {e}",
                result.total_balance
            ))
        })
    }
}
