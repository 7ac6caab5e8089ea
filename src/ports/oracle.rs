//! Balance Oracle Port
//!
//! Read-only balance query against the chain's RPC layer. Returns the raw
//! base-unit amount; conversion to display units is the caller's job.

use async_trait::async_trait;

use crate::domain::errors::WalletError;

#[async_trait]
pub trait BalanceOracle: Send + Sync {
    /// Total native-coin balance of `address` in base units.
    async fn get_balance(&self, address: &str) -> Result<u64, WalletError>;
}
