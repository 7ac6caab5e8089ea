//! Mock Ports
//!
//! Deterministic, call-recording implementations of the port traits used
//! across the unit and integration tests. Responses are configured with
//! builder methods; unconfigured calls fail loudly.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::errors::WalletError;
use crate::ports::oracle::BalanceOracle;
use crate::ports::wallet::{
    CapabilitySet, ExecutionReceipt, SignAndExecuteRequest, WalletHandle, WalletProvider,
};

/// Mock wallet handle that records calls and returns scripted responses.
pub struct MockWallet {
    name: String,
    capabilities: CapabilitySet,
    connect_response: Mutex<Result<Vec<String>, WalletError>>,
    disconnect_response: Mutex<Result<(), WalletError>>,
    sign_responses: Mutex<VecDeque<Result<ExecutionReceipt, WalletError>>>,
    sign_delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
    sign_requests: Mutex<Vec<SignAndExecuteRequest>>,
}

impl MockWallet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            capabilities: CapabilitySet::full(),
            connect_response: Mutex::new(Ok(vec!["0xmockaccount".to_string()])),
            disconnect_response: Mutex::new(Ok(())),
            sign_responses: Mutex::new(VecDeque::new()),
            sign_delay: None,
            calls: Mutex::new(Vec::new()),
            sign_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_accounts(self, accounts: Vec<&str>) -> Self {
        *self.connect_response.lock().unwrap() =
            Ok(accounts.into_iter().map(String::from).collect());
        self
    }

    pub fn with_connect_error(self, error: WalletError) -> Self {
        *self.connect_response.lock().unwrap() = Err(error);
        self
    }

    pub fn with_disconnect_error(self, error: WalletError) -> Self {
        *self.disconnect_response.lock().unwrap() = Err(error);
        self
    }

    pub fn with_sign_response(self, digest: &str) -> Self {
        self.sign_responses
            .lock()
            .unwrap()
            .push_back(Ok(ExecutionReceipt {
                digest: digest.to_string(),
            }));
        self
    }

    pub fn with_sign_error(self, error: WalletError) -> Self {
        self.sign_responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Delay every sign call, so tests can overlap a second operation with
    /// a suspended one.
    pub fn with_sign_delay(mut self, delay: Duration) -> Self {
        self.sign_delay = Some(delay);
        self
    }

    /// Names of the wallet methods invoked, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Every sign-and-execute request received.
    pub fn sign_requests(&self) -> Vec<SignAndExecuteRequest> {
        self.sign_requests.lock().unwrap().clone()
    }

    pub fn sign_call_count(&self) -> usize {
        self.sign_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletHandle for MockWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    async fn connect(&self) -> Result<Vec<String>, WalletError> {
        self.calls.lock().unwrap().push("connect".to_string());
        self.connect_response.lock().unwrap().clone()
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        self.calls.lock().unwrap().push("disconnect".to_string());
        self.disconnect_response.lock().unwrap().clone()
    }

    async fn sign_and_execute(
        &self,
        request: SignAndExecuteRequest,
    ) -> Result<ExecutionReceipt, WalletError> {
        self.calls
            .lock()
            .unwrap()
            .push("sign_and_execute".to_string());
        self.sign_requests.lock().unwrap().push(request);
        if let Some(delay) = self.sign_delay {
            tokio::time::sleep(delay).await;
        }
        self.sign_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(WalletError::RemoteCallFailure(
                    "no sign response configured".to_string(),
                ))
            })
    }
}

/// Mock provider backed by a fixed, ordered wallet list.
#[derive(Default)]
pub struct MockWalletProvider {
    wallets: Mutex<Vec<Arc<dyn WalletHandle>>>,
}

impl MockWalletProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wallet(self, wallet: Arc<dyn WalletHandle>) -> Self {
        self.wallets.lock().unwrap().push(wallet);
        self
    }
}

impl WalletProvider for MockWalletProvider {
    fn enumerate(&self) -> Vec<Arc<dyn WalletHandle>> {
        self.wallets.lock().unwrap().clone()
    }
}

/// Mock oracle with a queue of optionally delayed responses, consumed in
/// call order.
#[derive(Default)]
pub struct MockOracle {
    responses: Mutex<VecDeque<(Duration, Result<u64, WalletError>)>>,
    calls: Mutex<Vec<String>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(self, base_units: u64) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((Duration::ZERO, Ok(base_units)));
        self
    }

    pub fn with_delayed_balance(self, delay: Duration, base_units: u64) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((delay, Ok(base_units)));
        self
    }

    pub fn with_error(self, error: WalletError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back((Duration::ZERO, Err(error)));
        self
    }

    /// Addresses queried, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BalanceOracle for MockOracle {
    async fn get_balance(&self, address: &str) -> Result<u64, WalletError> {
        self.calls.lock().unwrap().push(address.to_string());
        let (delay, result) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                (
                    Duration::ZERO,
                    Err(WalletError::RemoteCallFailure(
                        "no balance response configured".to_string(),
                    )),
                )
            });
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}
