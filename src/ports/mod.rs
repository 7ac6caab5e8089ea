//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract:
//! - Wallet discovery and per-wallet operations (connect, disconnect,
//!   sign-and-execute)
//! - Balance queries against the chain RPC
//! - Durable storage of the preferred-wallet name

pub mod mocks;
pub mod oracle;
pub mod storage;
pub mod wallet;

pub use oracle::BalanceOracle;
pub use storage::PreferenceStore;
pub use wallet::{
    Capability, CapabilitySet, ExecutionReceipt, SignAndExecuteRequest, WalletHandle,
    WalletProvider,
};
