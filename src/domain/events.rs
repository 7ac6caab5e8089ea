//! Wallet Events
//!
//! Closed set of typed notifications emitted by the connection manager,
//! plus the minimal publish/subscribe fabric that decouples wallet state
//! from its consumers. Listeners subscribe per event kind; emission runs
//! in subscription order and happens synchronously after the triggering
//! state change, so listeners always observe the already-updated state.

use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::domain::account::Account;

#[derive(Debug, Clone, PartialEq)]
pub enum WalletEvent {
    Connected { account: Account },
    Disconnected,
    BalanceUpdated { balance: Decimal },
}

impl WalletEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WalletEvent::Connected { .. } => EventKind::Connected,
            WalletEvent::Disconnected => EventKind::Disconnected,
            WalletEvent::BalanceUpdated { .. } => EventKind::BalanceUpdated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Connected,
    Disconnected,
    BalanceUpdated,
}

type Listener = Box<dyn Fn(&WalletEvent) + Send + Sync>;

/// Minimal synchronous event bus keyed by `EventKind`.
#[derive(Default)]
pub struct EventBus {
    listeners: Mutex<Vec<(EventKind, Listener)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind. Multiple listeners per kind
    /// are allowed and fire in subscription order.
    pub fn subscribe<F>(&self, kind: EventKind, listener: F)
    where
        F: Fn(&WalletEvent) + Send + Sync + 'static,
    {
        self.listeners
            .lock()
            .unwrap()
            .push((kind, Box::new(listener)));
    }

    /// Dispatch an event to every listener subscribed to its kind.
    pub fn emit(&self, event: &WalletEvent) {
        let listeners = self.listeners.lock().unwrap();
        for (kind, listener) in listeners.iter() {
            if *kind == event.kind() {
                listener(event);
            }
        }
    }
}
