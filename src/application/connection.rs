//! Wallet Connection Manager
//!
//! Owns the connection lifecycle state machine, the selected wallet and
//! account, and the cached balance snapshot. One instance per session,
//! created by the composition root and shared by reference; consumers
//! observe it through the event bus.
//!
//! Transitions are serialized: a trigger arriving while another transition
//! is suspended at an external call is rejected, never queued. The session
//! lock is only ever held across synchronous sections, not across awaits.

use std::sync::{Arc, Mutex, MutexGuard};

use rust_decimal::Decimal;

use crate::domain::account::Account;
use crate::domain::amount;
use crate::domain::errors::WalletError;
use crate::domain::events::{EventBus, WalletEvent};
use crate::domain::snapshot::BalanceSnapshot;
use crate::ports::oracle::BalanceOracle;
use crate::ports::storage::PreferenceStore;
use crate::ports::wallet::{Capability, WalletHandle, WalletProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

/// Mutable session state behind the manager's lock.
#[derive(Default)]
struct Session {
    state: ConnectionState,
    wallet: Option<Arc<dyn WalletHandle>>,
    account: Option<Account>,
    balance: Option<BalanceSnapshot>,
    /// Start-order sequence handed to the next balance query.
    issued_seq: u64,
    /// Highest sequence whose result has been applied.
    applied_seq: u64,
}

impl Session {
    /// Clear wallet, account and balance atomically with the transition to
    /// `Disconnected`. No partial state survives.
    fn reset(&mut self) {
        self.state = ConnectionState::Disconnected;
        self.wallet = None;
        self.account = None;
        self.balance = None;
    }
}

pub struct WalletConnectionManager {
    provider: Arc<dyn WalletProvider>,
    oracle: Arc<dyn BalanceOracle>,
    store: Arc<dyn PreferenceStore>,
    events: EventBus,
    session: Mutex<Session>,
}

impl WalletConnectionManager {
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        oracle: Arc<dyn BalanceOracle>,
        store: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            provider,
            oracle,
            store,
            events: EventBus::new(),
            session: Mutex::new(Session::default()),
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn state(&self) -> ConnectionState {
        self.session().state
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn account(&self) -> Option<Account> {
        self.session().account.clone()
    }

    pub fn balance(&self) -> Option<BalanceSnapshot> {
        self.session().balance.clone()
    }

    /// Fresh provider query, filtered to wallets that can sign and execute
    /// transactions. Provider order is preserved.
    pub fn list_available_wallets(&self) -> Vec<Arc<dyn WalletHandle>> {
        self.provider
            .enumerate()
            .into_iter()
            .filter(|w| w.capabilities().supports(Capability::SignAndExecute))
            .collect()
    }

    /// Connect to `handle`, or resolve one from the provider when omitted:
    /// an empty list fails with `NoWalletFound`, a single wallet is chosen,
    /// and more than one requires the caller to disambiguate.
    ///
    /// On success the wallet and its first account are bound, the wallet
    /// name is persisted for auto-reconnect, an initial balance refresh is
    /// issued, and a `Connected` event fires. Any failure restores
    /// `Disconnected` with no partial state retained.
    pub async fn connect(
        &self,
        handle: Option<Arc<dyn WalletHandle>>,
    ) -> Result<Account, WalletError> {
        {
            let mut session = self.session();
            if session.state != ConnectionState::Disconnected {
                return Err(WalletError::AlreadyInProgress);
            }
            session.state = ConnectionState::Connecting;
        }

        match self.establish(handle).await {
            Ok(account) => {
                if let Err(err) = self.refresh_balance().await {
                    tracing::warn!("initial balance refresh failed: {err}");
                }
                self.events.emit(&WalletEvent::Connected {
                    account: account.clone(),
                });
                Ok(account)
            }
            Err(err) => {
                self.session().reset();
                tracing::warn!("wallet connect failed: {err}");
                Err(err)
            }
        }
    }

    /// Attempt to reconnect to the previously persisted wallet. Never
    /// raises: a missing preference or absent wallet yields `false`, and a
    /// failed connect attempt clears the stale preference.
    pub async fn auto_connect(&self) -> bool {
        let Some(preferred) = self.store.load() else {
            return false;
        };
        let Some(wallet) = self
            .list_available_wallets()
            .into_iter()
            .find(|w| w.name() == preferred)
        else {
            // The preferred wallet may just not be installed right now;
            // keep the preference for a later session.
            return false;
        };

        match self.connect(Some(wallet)).await {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!("auto-connect failed: {err}");
                self.store.clear();
                false
            }
        }
    }

    /// Tear down the session. The wallet's disconnect capability is invoked
    /// when present, but its failure never blocks the local reset: state,
    /// wallet, account and balance are always cleared, the persisted
    /// preference removed, and a `Disconnected` event emitted. No-op when
    /// not connected.
    pub async fn disconnect(&self) {
        let wallet = {
            let mut session = self.session();
            if session.state != ConnectionState::Connected {
                return;
            }
            session.state = ConnectionState::Disconnecting;
            session.wallet.clone()
        };

        if let Some(wallet) = wallet {
            if wallet.capabilities().supports(Capability::Disconnect) {
                if let Err(err) = wallet.disconnect().await {
                    tracing::warn!("wallet disconnect call failed: {err}");
                }
            }
        }

        self.session().reset();
        self.store.clear();
        tracing::info!("wallet disconnected");
        self.events.emit(&WalletEvent::Disconnected);
    }

    /// Query the oracle for the bound account's balance. No-op unless
    /// connected. A result is applied only if no later-started query has
    /// already resolved; stale results are discarded rather than installed.
    /// Oracle failures are surfaced to the caller but never change the
    /// connection state.
    pub async fn refresh_balance(&self) -> Result<(), WalletError> {
        let (address, seq) = {
            let mut session = self.session();
            if session.state != ConnectionState::Connected {
                return Ok(());
            }
            let Some(account) = session.account.clone() else {
                return Ok(());
            };
            session.issued_seq += 1;
            (account.address, session.issued_seq)
        };

        let base_units = self.oracle.get_balance(&address).await?;
        let balance = amount::from_base_units(base_units);

        let applied = {
            let mut session = self.session();
            if session.state != ConnectionState::Connected {
                return Ok(());
            }
            if seq <= session.applied_seq {
                tracing::debug!(
                    seq,
                    applied_seq = session.applied_seq,
                    "discarding stale balance result"
                );
                None
            } else {
                session.applied_seq = seq;
                let snapshot = BalanceSnapshot::new(balance, seq);
                session.balance = Some(snapshot.clone());
                Some(snapshot)
            }
        };

        if let Some(snapshot) = applied {
            tracing::debug!(balance = %snapshot.display(), "balance updated");
            self.events.emit(&WalletEvent::BalanceUpdated {
                balance: snapshot.amount,
            });
        }
        Ok(())
    }

    /// Snapshot of the connected session for the swap orchestrator: the
    /// wallet handle, the bound account, and the full-precision available
    /// balance (zero when no snapshot has resolved yet).
    pub(crate) fn swap_context(
        &self,
    ) -> Result<(Arc<dyn WalletHandle>, Account, Decimal), WalletError> {
        let session = self.session();
        if session.state != ConnectionState::Connected {
            return Err(WalletError::NotConnected);
        }
        let wallet = session.wallet.clone().ok_or(WalletError::NotConnected)?;
        let account = session.account.clone().ok_or(WalletError::NotConnected)?;
        let available = session
            .balance
            .as_ref()
            .map(|b| b.amount)
            .unwrap_or(Decimal::ZERO);
        Ok((wallet, account, available))
    }

    async fn establish(
        &self,
        handle: Option<Arc<dyn WalletHandle>>,
    ) -> Result<Account, WalletError> {
        let wallet = match handle {
            Some(wallet) => wallet,
            None => {
                let mut wallets = self.list_available_wallets();
                match wallets.len() {
                    0 => return Err(WalletError::NoWalletFound),
                    1 => wallets.remove(0),
                    _ => return Err(WalletError::AmbiguousWalletSelection),
                }
            }
        };

        if !wallet.capabilities().supports(Capability::Connect) {
            return Err(WalletError::CapabilityUnsupported(Capability::Connect));
        }

        let addresses = wallet.connect().await?;
        let address = addresses
            .into_iter()
            .next()
            .ok_or(WalletError::NoAccountsReturned)?;
        let account = Account::new(address, wallet.name());

        {
            let mut session = self.session();
            session.wallet = Some(Arc::clone(&wallet));
            session.account = Some(account.clone());
            session.state = ConnectionState::Connected;
        }
        self.store.save(wallet.name());
        tracing::info!(
            wallet = wallet.name(),
            address = %account.short_address(),
            "wallet connected"
        );
        Ok(account)
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap()
    }
}
