//! Domain Layer - Core types and logic for the wallet/swap core
//!
//! Pure domain types with no external dependencies. All external
//! interactions happen through the ports layer.
//!
//! - `account`: connected account with wallet provenance
//! - `amount`: amount validation and base-unit conversion
//! - `errors`: the closed error taxonomy
//! - `events`: typed wallet events and the event bus
//! - `snapshot`: sequence-tagged balance snapshots
//! - `transaction`: the SUI->WAL exchange call description

pub mod account;
pub mod amount;
pub mod errors;
pub mod events;
pub mod snapshot;
pub mod transaction;

pub use account::Account;
pub use errors::WalletError;
pub use events::{EventBus, EventKind, WalletEvent};
pub use snapshot::BalanceSnapshot;
pub use transaction::SwapTransaction;
