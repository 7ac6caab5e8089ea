//! Wallet Provider Port
//!
//! Trait seam over the host environment's wallet discovery and per-wallet
//! operations. Capability support is a typed set query rather than a
//! property probe: callers ask whether a handle supports an operation and
//! get a definite answer before invoking it.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::Account;
use crate::domain::errors::WalletError;
use crate::domain::transaction::SwapTransaction;

/// Named operation a wallet may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Connect,
    Disconnect,
    SignAndExecute,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Connect => "connect",
            Capability::Disconnect => "disconnect",
            Capability::SignAndExecute => "sign-and-execute",
        };
        f.write_str(name)
    }
}

/// Capability set a wallet handle advertises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    connect: bool,
    disconnect: bool,
    sign_and_execute: bool,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All three capabilities.
    pub fn full() -> Self {
        Self::new()
            .with(Capability::Connect)
            .with(Capability::Disconnect)
            .with(Capability::SignAndExecute)
    }

    pub fn with(mut self, capability: Capability) -> Self {
        match capability {
            Capability::Connect => self.connect = true,
            Capability::Disconnect => self.disconnect = true,
            Capability::SignAndExecute => self.sign_and_execute = true,
        }
        self
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Connect => self.connect,
            Capability::Disconnect => self.disconnect,
            Capability::SignAndExecute => self.sign_and_execute,
        }
    }
}

/// Everything the wallet needs to sign and execute one swap.
#[derive(Debug, Clone)]
pub struct SignAndExecuteRequest {
    pub transaction: SwapTransaction,
    pub account: Account,
    pub chain: String,
}

/// Result of a successfully executed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReceipt {
    /// Unique digest of the executed transaction.
    pub digest: String,
}

/// One installed wallet. Each async method is a suspension point where a
/// re-entrant trigger could race in; the connection manager and the swap
/// orchestrator serialize around them.
#[async_trait]
pub trait WalletHandle: Send + Sync {
    /// Identifying name, also the key persisted for auto-reconnect.
    fn name(&self) -> &str;

    fn capabilities(&self) -> CapabilitySet;

    /// Request user approval and return the wallet's account addresses.
    async fn connect(&self) -> Result<Vec<String>, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;

    async fn sign_and_execute(
        &self,
        request: SignAndExecuteRequest,
    ) -> Result<ExecutionReceipt, WalletError>;
}

/// Enumerates installed wallets. Synchronous: discovery is a local registry
/// read, not a network call.
pub trait WalletProvider: Send + Sync {
    fn enumerate(&self) -> Vec<Arc<dyn WalletHandle>>;
}
