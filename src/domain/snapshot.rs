//! Balance Snapshot
//!
//! Point-in-time balance in display units, tagged with the start-order
//! sequence of the query that produced it. The connection manager only
//! installs a snapshot whose sequence is newer than the last applied one,
//! so a slow query can never clobber a fresher result.

use std::time::{SystemTime, UNIX_EPOCH};

use rust_decimal::Decimal;

use crate::domain::amount;

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSnapshot {
    /// Balance in display units (SUI).
    pub amount: Decimal,
    /// Start-order sequence of the query that produced this value.
    pub seq: u64,
    /// Unix timestamp of when the query resolved.
    pub fetched_at: u64,
}

impl BalanceSnapshot {
    pub fn new(amount: Decimal, seq: u64) -> Self {
        let fetched_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self {
            amount,
            seq,
            fetched_at,
        }
    }

    /// 4-decimal-place presentation form (truncated, not rounded).
    pub fn display(&self) -> String {
        amount::format_display(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_truncates() {
        let snapshot = BalanceSnapshot::new(dec!(3.14159265), 1);
        assert_eq!(snapshot.display(), "3.1415");
    }

    #[test]
    fn test_carries_sequence() {
        let snapshot = BalanceSnapshot::new(dec!(10), 7);
        assert_eq!(snapshot.seq, 7);
        assert!(snapshot.fetched_at > 0);
    }
}
