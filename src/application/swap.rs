//! Swap Transaction Orchestrator
//!
//! Validate-build-sign-execute pipeline for one SUI->WAL swap. Stateless
//! apart from the in-flight flag: a second invocation while one swap is
//! suspended at the wallet is rejected, never queued. Every failure
//! resolves to a `Failure` outcome; nothing escapes the orchestrator
//! boundary, and the connection state is never altered here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::connection::WalletConnectionManager;
use crate::config::SwapConfig;
use crate::domain::amount;
use crate::domain::errors::WalletError;
use crate::domain::transaction::SwapTransaction;
use crate::ports::wallet::{Capability, SignAndExecuteRequest};

/// Terminal result of one swap attempt. Not retained beyond notifying the
/// caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SwapOutcome {
    Success { digest: String },
    Failure { reason: WalletError },
}

impl SwapOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SwapOutcome::Success { .. })
    }
}

/// RAII acquisition of the in-flight flag: released on every exit path,
/// success or failure, when the guard drops.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SwapOrchestrator {
    connection: Arc<WalletConnectionManager>,
    config: SwapConfig,
    in_flight: AtomicBool,
}

impl SwapOrchestrator {
    pub fn new(connection: Arc<WalletConnectionManager>, config: SwapConfig) -> Self {
        Self {
            connection,
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run the full swap pipeline for a user-supplied amount string.
    ///
    /// Guard order: not connected, already in progress, amount format,
    /// positivity, balance sufficiency (raw amount against the
    /// full-precision balance, no fee margin), then construction and
    /// submission through the wallet's sign-and-execute capability. A
    /// successful execution triggers exactly one subsequent balance
    /// refresh.
    pub async fn execute_swap(&self, amount_input: &str) -> SwapOutcome {
        match self.try_execute(amount_input).await {
            Ok(digest) => {
                tracing::info!(%digest, "swap executed");
                SwapOutcome::Success { digest }
            }
            Err(reason) => {
                tracing::warn!("swap failed: {reason}");
                SwapOutcome::Failure { reason }
            }
        }
    }

    async fn try_execute(&self, amount_input: &str) -> Result<String, WalletError> {
        let (wallet, account, available) = self.connection.swap_context()?;

        let _guard =
            InFlightGuard::acquire(&self.in_flight).ok_or(WalletError::AlreadyInProgress)?;

        let requested = amount::parse_amount(amount_input)?;
        if requested > available {
            return Err(WalletError::InsufficientBalance {
                requested,
                available,
            });
        }

        let transaction = SwapTransaction::build(requested, &self.config, &account.address)?;
        if !wallet
            .capabilities()
            .supports(Capability::SignAndExecute)
        {
            return Err(WalletError::CapabilityUnsupported(
                Capability::SignAndExecute,
            ));
        }

        tracing::debug!(
            split_amount = transaction.split_amount,
            target = %transaction.target,
            "submitting swap"
        );
        let receipt = wallet
            .sign_and_execute(SignAndExecuteRequest {
                transaction,
                account,
                chain: self.config.chain.clone(),
            })
            .await?;

        if let Err(err) = self.connection.refresh_balance().await {
            tracing::warn!("post-swap balance refresh failed: {err}");
        }
        Ok(receipt.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryPreferenceStore;
    use crate::ports::mocks::{MockOracle, MockWallet, MockWalletProvider};
    use crate::ports::oracle::BalanceOracle;
    use crate::ports::storage::PreferenceStore;
    use crate::ports::wallet::CapabilitySet;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    struct Fixture {
        orchestrator: SwapOrchestrator,
        connection: Arc<WalletConnectionManager>,
        wallet: Arc<MockWallet>,
        oracle: Arc<MockOracle>,
    }

    fn fixture(wallet: MockWallet, oracle: MockOracle) -> Fixture {
        let wallet = Arc::new(wallet);
        let oracle = Arc::new(oracle);
        let provider = MockWalletProvider::new().with_wallet(wallet.clone());
        let connection = Arc::new(WalletConnectionManager::new(
            Arc::new(provider),
            Arc::clone(&oracle) as Arc<dyn BalanceOracle>,
            Arc::new(MemoryPreferenceStore::new()) as Arc<dyn PreferenceStore>,
        ));
        let orchestrator =
            SwapOrchestrator::new(Arc::clone(&connection), SwapConfig::testnet());
        Fixture {
            orchestrator,
            connection,
            wallet,
            oracle,
        }
    }

    /// Connected fixture with a 5 SUI starting balance.
    async fn connected_fixture(wallet: MockWallet) -> Fixture {
        let fx = fixture(wallet, MockOracle::new().with_balance(5_000_000_000));
        fx.connection.connect(None).await.unwrap();
        fx
    }

    #[tokio::test]
    async fn test_swap_when_not_connected() {
        let fx = fixture(MockWallet::new("Slush"), MockOracle::new());
        let outcome = fx.orchestrator.execute_swap("1.0").await;
        assert_eq!(
            outcome,
            SwapOutcome::Failure {
                reason: WalletError::NotConnected
            }
        );
        assert_eq!(fx.wallet.sign_call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_amounts_never_reach_wallet() {
        let fx = connected_fixture(MockWallet::new("Slush")).await;
        for input in ["", "abc", "-1", "1e9", "1.2.3", "NaN"] {
            let outcome = fx.orchestrator.execute_swap(input).await;
            assert!(
                matches!(
                    outcome,
                    SwapOutcome::Failure {
                        reason: WalletError::InvalidAmountFormat(_)
                    }
                ),
                "expected format failure for {input:?}"
            );
        }
        assert_eq!(fx.wallet.sign_call_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let fx = connected_fixture(MockWallet::new("Slush")).await;
        let outcome = fx.orchestrator.execute_swap("0").await;
        assert_eq!(
            outcome,
            SwapOutcome::Failure {
                reason: WalletError::NonPositiveAmount
            }
        );
    }

    #[tokio::test]
    async fn test_amount_above_balance_rejected() {
        let fx = connected_fixture(MockWallet::new("Slush")).await;
        let outcome = fx.orchestrator.execute_swap("5.000000001").await;
        assert_eq!(
            outcome,
            SwapOutcome::Failure {
                reason: WalletError::InsufficientBalance {
                    requested: dec!(5.000000001),
                    available: dec!(5),
                }
            }
        );
        assert_eq!(fx.wallet.sign_call_count(), 0);
    }

    #[tokio::test]
    async fn test_balance_check_uses_full_precision() {
        // 5.00001 displays as "5.0000" but must still be rejected.
        let fx = connected_fixture(MockWallet::new("Slush")).await;
        let outcome = fx.orchestrator.execute_swap("5.00001").await;
        assert!(matches!(
            outcome,
            SwapOutcome::Failure {
                reason: WalletError::InsufficientBalance { .. }
            }
        ));

        // Exactly the balance is allowed: no fee margin is subtracted here.
        let fx = connected_fixture(MockWallet::new("Slush").with_sign_response("digest1")).await;
        let outcome = fx.orchestrator.execute_swap("5").await;
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_successful_swap_builds_expected_request() {
        let wallet = MockWallet::new("Slush")
            .with_accounts(vec!["0xsender"])
            .with_sign_response("9zXw3digest");
        let fx = connected_fixture(wallet).await;

        let outcome = fx.orchestrator.execute_swap("2.5").await;
        assert_eq!(
            outcome,
            SwapOutcome::Success {
                digest: "9zXw3digest".to_string()
            }
        );

        let requests = fx.wallet.sign_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.transaction.split_amount, 2_500_000_000);
        assert!(request
            .transaction
            .target
            .ends_with("::wal_exchange::exchange_all_for_wal"));
        assert_eq!(request.transaction.recipient, "0xsender");
        assert_eq!(request.account.address, "0xsender");
        assert_eq!(request.chain, "sui:testnet");
    }

    #[tokio::test]
    async fn test_successful_swap_triggers_one_refresh() {
        let fx = connected_fixture(MockWallet::new("Slush").with_sign_response("digest")).await;
        let calls_before = fx.oracle.call_count();

        let outcome = fx.orchestrator.execute_swap("2.5").await;
        assert!(outcome.is_success());
        assert_eq!(fx.oracle.call_count(), calls_before + 1);
    }

    #[tokio::test]
    async fn test_sign_failure_surfaces_without_disconnecting() {
        let wallet = MockWallet::new("Slush")
            .with_sign_error(WalletError::RemoteCallFailure("user rejected".into()));
        let fx = connected_fixture(wallet).await;

        let outcome = fx.orchestrator.execute_swap("1").await;
        assert_eq!(
            outcome,
            SwapOutcome::Failure {
                reason: WalletError::RemoteCallFailure("user rejected".to_string())
            }
        );
        assert!(fx.connection.is_connected());
    }

    #[tokio::test]
    async fn test_missing_sign_capability() {
        // Wallet connected through an explicit handle despite lacking
        // signing support.
        let wallet = Arc::new(MockWallet::new("Viewer").with_capabilities(
            CapabilitySet::new()
                .with(Capability::Connect)
                .with(Capability::Disconnect),
        ));
        let fx = fixture(
            MockWallet::new("Unused"),
            MockOracle::new().with_balance(5_000_000_000),
        );
        fx.connection
            .connect(Some(wallet.clone() as Arc<dyn crate::ports::wallet::WalletHandle>))
            .await
            .unwrap();

        let outcome = fx.orchestrator.execute_swap("1").await;
        assert_eq!(
            outcome,
            SwapOutcome::Failure {
                reason: WalletError::CapabilityUnsupported(Capability::SignAndExecute)
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_swap_rejected_not_queued() {
        let wallet = MockWallet::new("Slush")
            .with_sign_delay(Duration::from_millis(50))
            .with_sign_response("digest");
        let fx = connected_fixture(wallet).await;

        let (first, second) = tokio::join!(
            fx.orchestrator.execute_swap("1"),
            fx.orchestrator.execute_swap("1")
        );

        assert!(first.is_success());
        assert_eq!(
            second,
            SwapOutcome::Failure {
                reason: WalletError::AlreadyInProgress
            }
        );
        // Only the first attempt reached the wallet.
        assert_eq!(fx.wallet.sign_call_count(), 1);
    }

    #[tokio::test]
    async fn test_flag_released_after_failure() {
        let wallet = MockWallet::new("Slush")
            .with_sign_error(WalletError::RemoteCallFailure("blip".into()))
            .with_sign_response("digest2");
        let fx = connected_fixture(wallet).await;

        let first = fx.orchestrator.execute_swap("1").await;
        assert!(!first.is_success());

        // The in-flight flag was released on the failure path.
        let second = fx.orchestrator.execute_swap("1").await;
        assert!(second.is_success());
    }
}
