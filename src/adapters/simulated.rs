//! Simulated Wallet Environment
//!
//! Deterministic in-process wallet, provider and oracle sharing one
//! base-unit ledger. Used by the `demo` CLI command and the end-to-end
//! tests: swaps debit the ledger, so a post-swap balance refresh observes
//! the spend without any network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::errors::WalletError;
use crate::ports::oracle::BalanceOracle;
use crate::ports::wallet::{
    CapabilitySet, ExecutionReceipt, SignAndExecuteRequest, WalletHandle, WalletProvider,
};

struct Ledger {
    address: String,
    balance: Mutex<u64>,
    executed: Mutex<u64>,
}

/// Handle to the shared simulated chain state.
#[derive(Clone)]
pub struct SimulatedEnv {
    ledger: Arc<Ledger>,
    wallet_name: String,
}

impl SimulatedEnv {
    pub fn new(wallet_name: &str, address: &str, initial_balance: u64) -> Self {
        Self {
            ledger: Arc::new(Ledger {
                address: address.to_string(),
                balance: Mutex::new(initial_balance),
                executed: Mutex::new(0),
            }),
            wallet_name: wallet_name.to_string(),
        }
    }

    pub fn provider(&self) -> Arc<dyn WalletProvider> {
        Arc::new(SimulatedProvider {
            wallet: Arc::new(SimulatedWallet {
                name: self.wallet_name.clone(),
                ledger: Arc::clone(&self.ledger),
            }),
        })
    }

    pub fn oracle(&self) -> Arc<dyn BalanceOracle> {
        Arc::new(SimulatedOracle {
            ledger: Arc::clone(&self.ledger),
        })
    }

    /// Current ledger balance in base units.
    pub fn balance(&self) -> u64 {
        *self.ledger.balance.lock().unwrap()
    }

    /// Number of transactions executed against the ledger.
    pub fn executed_count(&self) -> u64 {
        *self.ledger.executed.lock().unwrap()
    }
}

struct SimulatedWallet {
    name: String,
    ledger: Arc<Ledger>,
}

#[async_trait]
impl WalletHandle for SimulatedWallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }

    async fn connect(&self) -> Result<Vec<String>, WalletError> {
        Ok(vec![self.ledger.address.clone()])
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        Ok(())
    }

    async fn sign_and_execute(
        &self,
        request: SignAndExecuteRequest,
    ) -> Result<ExecutionReceipt, WalletError> {
        let mut balance = self.ledger.balance.lock().unwrap();
        let split = request.transaction.split_amount;
        if split > *balance {
            return Err(WalletError::RemoteCallFailure(
                "simulated ledger: not enough gas coin balance to split".to_string(),
            ));
        }
        *balance -= split;
        let mut executed = self.ledger.executed.lock().unwrap();
        *executed += 1;
        Ok(ExecutionReceipt {
            digest: format!("SIMTX{:08}", *executed),
        })
    }
}

struct SimulatedProvider {
    wallet: Arc<SimulatedWallet>,
}

impl WalletProvider for SimulatedProvider {
    fn enumerate(&self) -> Vec<Arc<dyn WalletHandle>> {
        vec![Arc::clone(&self.wallet) as Arc<dyn WalletHandle>]
    }
}

struct SimulatedOracle {
    ledger: Arc<Ledger>,
}

#[async_trait]
impl BalanceOracle for SimulatedOracle {
    async fn get_balance(&self, address: &str) -> Result<u64, WalletError> {
        if address != self.ledger.address {
            return Ok(0);
        }
        Ok(*self.ledger.balance.lock().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, SwapTransaction};

    #[tokio::test]
    async fn test_swap_debits_ledger() {
        let env = SimulatedEnv::new("Sim", "0xsim", 5_000_000_000);
        let wallets = env.provider().enumerate();
        let wallet = &wallets[0];

        let receipt = wallet
            .sign_and_execute(SignAndExecuteRequest {
                transaction: SwapTransaction {
                    split_amount: 2_000_000_000,
                    target: "t".to_string(),
                    pool_object_id: "p".to_string(),
                    recipient: "0xsim".to_string(),
                },
                account: Account::new("0xsim", "Sim"),
                chain: "sui:testnet".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(receipt.digest, "SIMTX00000001");
        assert_eq!(env.balance(), 3_000_000_000);
        assert_eq!(env.oracle().get_balance("0xsim").await.unwrap(), 3_000_000_000);
    }

    #[tokio::test]
    async fn test_overdraw_rejected() {
        let env = SimulatedEnv::new("Sim", "0xsim", 1_000);
        let wallets = env.provider().enumerate();
        let result = wallets[0]
            .sign_and_execute(SignAndExecuteRequest {
                transaction: SwapTransaction {
                    split_amount: 2_000,
                    target: "t".to_string(),
                    pool_object_id: "p".to_string(),
                    recipient: "0xsim".to_string(),
                },
                account: Account::new("0xsim", "Sim"),
                chain: "sui:testnet".to_string(),
            })
            .await;
        assert!(matches!(result, Err(WalletError::RemoteCallFailure(_))));
        assert_eq!(env.balance(), 1_000);
    }

    #[tokio::test]
    async fn test_oracle_unknown_address_is_zero() {
        let env = SimulatedEnv::new("Sim", "0xsim", 42);
        assert_eq!(env.oracle().get_balance("0xother").await.unwrap(), 0);
    }
}
