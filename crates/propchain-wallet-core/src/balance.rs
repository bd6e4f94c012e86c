//! Conversion of `eth_getBalance` quantities into display strings.

use alloy::primitives::U256;
use serde_json::Value;
use thiserror::Error;

/// Smallest units per native unit (wei per ether).
pub const NATIVE_DECIMALS: u32 = 18;
/// Fractional digits shown to the user.
pub const DISPLAY_DECIMALS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("balance response must be a string, got {0}")]
    NotAString(String),
    #[error("balance quantity is empty")]
    Empty,
    #[error("invalid balance quantity {raw:?}: {reason}")]
    InvalidQuantity { raw: String, reason: String },
}

/// Parses a JSON-RPC quantity. `0x`-prefixed values are hex, anything else
/// is read as decimal.
pub fn parse_quantity(raw: &str) -> Result<U256, BalanceError> {
    let trimmed = raw.trim();
    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };
    if digits.is_empty() {
        return Err(BalanceError::Empty);
    }
    U256::from_str_radix(digits, radix).map_err(|e| BalanceError::InvalidQuantity {
        raw: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Formats a wei amount in native units with four fractional digits,
/// rounding half up on the fifth.
pub fn format_native_units(wei: U256) -> String {
    let unit = U256::from(10u64).pow(U256::from(NATIVE_DECIMALS - DISPLAY_DECIMALS));
    let half_unit = unit / U256::from(2u64);
    let scaled = wei.saturating_add(half_unit) / unit;

    let display_base = U256::from(10u64.pow(DISPLAY_DECIMALS));
    let whole = scaled / display_base;
    // remainder < 10^4, always within the low limb
    let fraction = (scaled % display_base).as_limbs()[0];
    format!(
        "{whole}.{fraction:0width$}",
        width = DISPLAY_DECIMALS as usize
    )
}

pub fn balance_from_response(value: &Value) -> Result<String, BalanceError> {
    let raw = value
        .as_str()
        .ok_or_else(|| BalanceError::NotAString(value.to_string()))?;
    Ok(format_native_units(parse_quantity(raw)?))
}
