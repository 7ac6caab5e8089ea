//! Application Layer - Connection lifecycle and swap orchestration
//!
//! `WalletConnectionManager` owns the session state machine and the event
//! bus; `SwapOrchestrator` reads from it and drives the validate-build-
//! sign-execute pipeline.

pub mod connection;
pub mod swap;

pub use connection::{ConnectionState, WalletConnectionManager};
pub use swap::{SwapOrchestrator, SwapOutcome};
