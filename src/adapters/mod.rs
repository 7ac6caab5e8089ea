//! Adapters Layer - External System Implementations
//!
//! Implementations of the port traits:
//! - RPC: Sui fullnode JSON-RPC balance oracle
//! - Storage: file-backed and in-memory preference stores
//! - Simulated: deterministic wallet environment for the demo and tests

pub mod rpc;
pub mod simulated;
pub mod storage;

pub use rpc::SuiBalanceOracle;
pub use simulated::SimulatedEnv;
pub use storage::{FilePreferenceStore, MemoryPreferenceStore};
