//! Walswap - Sui Wallet Connection and SUI->WAL Swap Library
//!
//! Connects a user's wallet to the application, tracks connection and
//! balance state, and orchestrates a single SUI->WAL exchange through the
//! Walrus testnet pool.
//!
//! # Modules
//!
//! - `domain`: Core types (Account, BalanceSnapshot, events, errors, amounts)
//! - `ports`: Trait abstractions (WalletProvider, BalanceOracle, PreferenceStore)
//! - `application`: WalletConnectionManager and SwapOrchestrator
//! - `adapters`: External implementations (Sui RPC, file storage, simulated env)
//! - `config`: Static on-chain exchange configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
