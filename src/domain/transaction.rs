//! Swap Transaction Description
//!
//! Declarative description of the on-chain exchange call handed to the
//! wallet for signing: split the requested amount (in base units) from the
//! payer's gas balance, feed it to the fixed exchange entry point against
//! the fixed pool, and route the output WAL coin back to the sender.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::SwapConfig;
use crate::domain::amount;
use crate::domain::errors::WalletError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapTransaction {
    /// Base units split off the gas coin as the exchange input.
    pub split_amount: u64,
    /// Fully qualified move call target, `package::module::function`.
    pub target: String,
    /// Liquidity pool object passed as the first call argument.
    pub pool_object_id: String,
    /// Address receiving the output token.
    pub recipient: String,
}

impl SwapTransaction {
    /// Build the call description for `amount` display units. The amount is
    /// floored to whole base units; overflow is reported as a format error.
    pub fn build(
        amount: Decimal,
        config: &SwapConfig,
        recipient: &str,
    ) -> Result<Self, WalletError> {
        let split_amount = amount::to_base_units(amount)
            .ok_or_else(|| WalletError::InvalidAmountFormat(amount.to_string()))?;
        Ok(Self {
            split_amount,
            target: config.target(),
            pool_object_id: config.pool_object_id.clone(),
            recipient: recipient.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WAL_EXCHANGE_POOL_ID;
    use rust_decimal_macros::dec;

    #[test]
    fn test_build_converts_to_base_units() {
        let tx = SwapTransaction::build(dec!(2.5), &SwapConfig::testnet(), "0xsender").unwrap();
        assert_eq!(tx.split_amount, 2_500_000_000);
        assert_eq!(tx.recipient, "0xsender");
        assert_eq!(tx.pool_object_id, WAL_EXCHANGE_POOL_ID);
        assert!(tx.target.ends_with("::wal_exchange::exchange_all_for_wal"));
    }

    #[test]
    fn test_build_floors_fractional_base_units() {
        let tx = SwapTransaction::build(dec!(1.23456789), &SwapConfig::testnet(), "0xs").unwrap();
        assert_eq!(tx.split_amount, 1_234_567_890);

        let tx = SwapTransaction::build(dec!(0.0000000015), &SwapConfig::testnet(), "0xs").unwrap();
        assert_eq!(tx.split_amount, 1);
    }
}
