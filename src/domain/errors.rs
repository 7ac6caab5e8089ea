//! Error Taxonomy
//!
//! Single closed error set shared by the connection manager, the swap
//! orchestrator and the port adapters. Connection-lifecycle errors abort
//! the in-progress transition and restore `Disconnected`; swap errors
//! resolve to a `Failure` outcome and never cross the orchestrator
//! boundary as panics. No variant is ever retried automatically.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ports::wallet::Capability;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WalletError {
    #[error("no wallet found supporting sign-and-execute")]
    NoWalletFound,

    #[error("multiple wallets available - an explicit selection is required")]
    AmbiguousWalletSelection,

    #[error("wallet does not support the {0} capability")]
    CapabilityUnsupported(Capability),

    #[error("wallet connect returned no accounts")]
    NoAccountsReturned,

    #[error("wallet is not connected")]
    NotConnected,

    #[error("another operation is already in progress")]
    AlreadyInProgress,

    #[error("invalid amount format: {0:?}")]
    InvalidAmountFormat(String),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("remote call failed: {0}")]
    RemoteCallFailure(String),
}
