//! Amount Parsing and Conversion
//!
//! Validates user-supplied swap amounts and converts between display units
//! (SUI) and base units (MIST) at the fixed 9-decimal scale. Conversion to
//! base units truncates any fractional base unit; it never rounds up.
//! Display formatting truncates to 4 decimal places, but sufficiency
//! comparisons always use full precision.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::BASE_UNIT_SCALE;
use crate::domain::errors::WalletError;

/// Accepted amount shape: unsigned decimal, no sign, no exponent.
const AMOUNT_PATTERN: &str = r"^\d+(\.\d+)?$";

/// SUI held back from the "max" helper so the swap can still pay gas.
pub const GAS_RESERVE_SUI: Decimal = dec!(0.05);

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(AMOUNT_PATTERN).expect("amount pattern compiles"))
}

/// Parse a user-supplied amount string into a strictly positive decimal.
///
/// Rejects empty, negative, scientific-notation and non-numeric inputs with
/// `InvalidAmountFormat`, and zero with `NonPositiveAmount`.
pub fn parse_amount(input: &str) -> Result<Decimal, WalletError> {
    if !amount_regex().is_match(input) {
        return Err(WalletError::InvalidAmountFormat(input.to_string()));
    }
    let amount = Decimal::from_str(input)
        .map_err(|_| WalletError::InvalidAmountFormat(input.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(WalletError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Convert a display-unit amount to base units, flooring any fractional
/// base unit. Returns `None` on overflow.
pub fn to_base_units(amount: Decimal) -> Option<u64> {
    amount
        .checked_mul(Decimal::from(BASE_UNIT_SCALE))?
        .floor()
        .to_u64()
}

/// Convert a raw base-unit balance to display units. Exact: a u64 scaled
/// by 10^9 always fits the 28-digit decimal mantissa.
pub fn from_base_units(base_units: u64) -> Decimal {
    Decimal::from_i128_with_scale(base_units as i128, 9).normalize()
}

/// Presentation-only truncation to 4 decimal places. Truncates first so
/// the padded formatting below can never round up.
pub fn format_display(amount: Decimal) -> String {
    format!("{:.4}", amount.trunc_with_scale(4))
}

/// Largest amount the "max" helper offers: the balance minus a fixed gas
/// reserve, never negative. The orchestrator's sufficiency check does NOT
/// apply this margin.
pub fn max_swap_amount(balance: Decimal) -> Decimal {
    (balance - GAS_RESERVE_SUI).max(Decimal::ZERO)
}
