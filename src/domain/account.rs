//! Account
//!
//! An address bound to the wallet that produced it. Immutable once bound;
//! the connection manager replaces it wholesale on reconnect.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Hex address of the account on chain.
    pub address: String,
    /// Name of the wallet that returned this account (provenance).
    pub wallet_name: String,
}

impl Account {
    pub fn new(address: impl Into<String>, wallet_name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            wallet_name: wallet_name.into(),
        }
    }

    /// Elided display form, `0x1234...abcd`. Addresses too short to elide
    /// are returned as-is.
    pub fn short_address(&self) -> String {
        if self.address.len() <= 10 {
            return self.address.clone();
        }
        format!(
            "{}...{}",
            &self.address[..6],
            &self.address[self.address.len() - 4..]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address_elides_middle() {
        let account = Account::new(
            "0x82593828ed3fcb8c6a235eac9abd0adbe9c5f9bb",
            "Slush",
        );
        assert_eq!(account.short_address(), "0x8259...f9bb");
    }

    #[test]
    fn test_short_address_keeps_short_inputs() {
        let account = Account::new("0xabcd", "Slush");
        assert_eq!(account.short_address(), "0xabcd");
    }

    #[test]
    fn test_provenance_recorded() {
        let account = Account::new("0xabc", "Sui Wallet");
        assert_eq!(account.wallet_name, "Sui Wallet");
    }
}
