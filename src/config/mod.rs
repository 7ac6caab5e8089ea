//! Static Swap Configuration
//!
//! On-chain identifiers for the Walrus SUI->WAL exchange. These are fixed
//! deployment constants, not runtime configuration: the orchestrator always
//! targets the same entry point, pool and network.

/// Base units (MIST) per display unit (SUI). Sui uses a 9-decimal scale.
pub const BASE_UNIT_SCALE: u64 = 1_000_000_000;

/// Package publishing the `wal_exchange` module on testnet.
pub const WAL_EXCHANGE_PACKAGE_ID: &str =
    "0x82593828ed3fcb8c6a235eac9abd0adbe9c5f9bbffa9b1e7a45cdd884481ef9f";

/// Module containing the exchange entry point.
pub const WAL_EXCHANGE_MODULE: &str = "wal_exchange";

/// Entry point that exchanges a SUI coin for WAL.
pub const WAL_EXCHANGE_FUNCTION: &str = "exchange_all_for_wal";

/// Shared liquidity pool object the entry point trades against.
pub const WAL_EXCHANGE_POOL_ID: &str =
    "0xf4d164ea2def5fe07dc573992a029e010dba09b1a8dcbc44c5c2e79567f39073";

/// Default Sui fullnode RPC endpoint.
pub const TESTNET_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";

/// Chain identifier passed to the wallet with every sign-and-execute call.
pub const TESTNET_CHAIN_ID: &str = "sui:testnet";

/// Resolved swap target configuration handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapConfig {
    pub package_id: String,
    pub module: String,
    pub function: String,
    pub pool_object_id: String,
    pub chain: String,
}

impl SwapConfig {
    /// The Walrus exchange deployment on Sui testnet.
    pub fn testnet() -> Self {
        Self {
            package_id: WAL_EXCHANGE_PACKAGE_ID.to_string(),
            module: WAL_EXCHANGE_MODULE.to_string(),
            function: WAL_EXCHANGE_FUNCTION.to_string(),
            pool_object_id: WAL_EXCHANGE_POOL_ID.to_string(),
            chain: TESTNET_CHAIN_ID.to_string(),
        }
    }

    /// Fully qualified move call target, `package::module::function`.
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package_id, self.module, self.function)
    }
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self::testnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_is_fully_qualified() {
        let config = SwapConfig::testnet();
        assert_eq!(
            config.target(),
            format!("{WAL_EXCHANGE_PACKAGE_ID}::wal_exchange::exchange_all_for_wal")
        );
    }

    #[test]
    fn test_default_is_testnet() {
        assert_eq!(SwapConfig::default(), SwapConfig::testnet());
    }
}
