// wallet-core/src/network/models.rs
//
// Data Models shared by providers, the transfer engine and the session
//
// Amounts are carried as `U256` base units (wei, lamports). Decimal strings
// only exist at the edges (user input, display).

use alloy::primitives::U256;
use serde::{Serialize, Serializer};

use crate::error::{WalletError, WalletResult};

// =============================================================================
// UNIT CONVERSION
// =============================================================================

/// Base units → decimal string, trailing zeros trimmed ("1.5", "0.001", "42")
pub fn format_units(raw: U256, decimals: u8) -> String {
    let raw = raw.to_string();
    if decimals == 0 || raw == "0" {
        return raw;
    }

    let raw_len = raw.len();
    let decimals = decimals as usize;

    if raw_len <= decimals {
        // Less than one whole unit
        let padding = decimals - raw_len;
        let decimal_part = format!("{}{}", "0".repeat(padding), raw);
        let trimmed = decimal_part.trim_end_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            format!("0.{}", trimmed)
        }
    } else {
        let integer_part = &raw[..raw_len - decimals];
        let decimal_part = &raw[raw_len - decimals..];
        let trimmed_decimal = decimal_part.trim_end_matches('0');
        if trimmed_decimal.is_empty() {
            integer_part.to_string()
        } else {
            format!("{}.{}", integer_part, trimmed_decimal)
        }
    }
}

/// Decimal string → base units, exact.
///
/// Accepts `"1"`, `"1.5"`, `".5"`, `"1."`. Rejects signs, exponents, more
/// fractional digits than `decimals`, and values that overflow `U256`.
pub fn parse_units(amount: &str, decimals: u8) -> WalletResult<U256> {
    let amount = amount.trim();
    let invalid = || WalletError::Validation(format!("Invalid amount: '{}'", amount));

    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, f),
        None => (amount, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }
    if frac_part.len() > decimals as usize {
        return Err(WalletError::Validation(format!(
            "Too many decimal places: at most {} allowed",
            decimals
        )));
    }

    let digits = format!(
        "{}{}{}",
        int_part,
        frac_part,
        "0".repeat(decimals as usize - frac_part.len())
    );
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10).map_err(|_| invalid())
}

// =============================================================================
// BALANCE
// =============================================================================

/// Native balance of one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Base units (serialized as a decimal string)
    #[serde(serialize_with = "serialize_decimal")]
    pub raw: U256,
    /// Human-readable, e.g. "1.5"
    pub formatted: String,
    /// e.g. "ETH", "SOL"
    pub symbol: String,
    pub decimals: u8,
}

fn serialize_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

impl Balance {
    pub fn new(raw: U256, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            raw,
            formatted: format_units(raw, decimals),
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn zero(symbol: impl Into<String>, decimals: u8) -> Self {
        Self::new(U256::ZERO, decimals, symbol)
    }
}

// =============================================================================
// TRANSACTIONS
// =============================================================================

/// Final status from a receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// status == 1
    Confirmed,
    /// Mined but reverted (status == 0)
    Failed,
}

/// Mined transaction outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub tx_hash: String,
    pub status: TransactionStatus,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
}

impl TransactionReceipt {
    #[inline]
    pub fn success(&self) -> bool {
        self.status == TransactionStatus::Confirmed
    }
}

// =============================================================================
// FEE ESTIMATION
// =============================================================================

/// Gas estimate for one transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    /// Gas limit
    pub gas_units: u64,
    /// Wei per gas (legacy gas price)
    pub unit_price: u128,
}

impl FeeEstimate {
    /// `gas_units * unit_price` in wei. Cannot overflow: u64 * u128 < 2^192.
    pub fn fee(&self) -> U256 {
        U256::from(self.gas_units) * U256::from(self.unit_price)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        let one_eth = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(format_units(one_eth, 18), "1");
        assert_eq!(
            format_units(U256::from(1_500_000_000_000_000_000u128), 18),
            "1.5"
        );
        assert_eq!(format_units(U256::from(1_000_000_000_000_000u128), 18), "0.001");
        assert_eq!(format_units(U256::from(1u8), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::from(1_500_000_000u64), 9), "1.5");
        assert_eq!(format_units(U256::from(42u8), 0), "42");
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(
            parse_units("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(parse_units("0.000000000000000001", 18).unwrap(), U256::from(1u8));
        assert_eq!(parse_units(".5", 1).unwrap(), U256::from(5u8));
        assert_eq!(parse_units("2.", 2).unwrap(), U256::from(200u16));
        assert_eq!(parse_units(" 90 ", 0).unwrap(), U256::from(90u8));
        assert_eq!(parse_units("0", 18).unwrap(), U256::ZERO);
        assert_eq!(parse_units("0.000", 18).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_units_rejects() {
        for bad in ["", ".", "-1", "+1", "1e18", "1.2.3", "abc", "1,5", "0x10"] {
            assert!(parse_units(bad, 18).is_err(), "accepted {:?}", bad);
        }
        assert!(parse_units("0.0000000000000000001", 18).is_err());
        // 2^256 overflows
        let huge = "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(parse_units(huge, 0).is_err());
    }

    #[test]
    fn test_format_parse_agree() {
        for s in ["1", "1.5", "0.001", "123456.789"] {
            assert_eq!(format_units(parse_units(s, 18).unwrap(), 18), s);
        }
    }

    #[test]
    fn test_balance() {
        let balance = Balance::new(U256::from(2_500_000_000u64), 9, "SOL");
        assert_eq!(balance.formatted, "2.5");
        assert_eq!(Balance::zero("ETH", 18).formatted, "0");

        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["raw"], "2500000000");
        assert_eq!(json["formatted"], "2.5");
    }

    #[test]
    fn test_fee_estimate() {
        let fee = FeeEstimate {
            gas_units: 21_000,
            unit_price: 30_000_000_000,
        };
        assert_eq!(fee.fee(), U256::from(630_000_000_000_000u128));

        let max = FeeEstimate {
            gas_units: u64::MAX,
            unit_price: u128::MAX,
        };
        assert_eq!(max.fee(), U256::from(u64::MAX) * U256::from(u128::MAX));
    }
}
