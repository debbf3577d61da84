// wallet-core/src/transfer/request.rs
//
// What the user typed (TransferDraft) → what the engine may act on
// (TransferRequest). Validation is pure and runs before any state change.

use alloy::primitives::{Address, U256};

use crate::chains::EvmAddress;
use crate::error::TransferError;
use crate::network::parse_units;

/// Raw recipient/amount input, edited field by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub recipient: String,
    /// Decimal string in whole units, e.g. "0.25"
    pub amount: String,
}

impl TransferDraft {
    pub fn new(recipient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recipient.trim().is_empty() && self.amount.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.recipient.clear();
        self.amount.clear();
    }

    /// Validate into a request. `decimals` converts the amount to base units.
    pub fn validate(&self, decimals: u8) -> Result<TransferRequest, TransferError> {
        let recipient = self.recipient.trim();
        if recipient.is_empty() {
            return Err(TransferError::InvalidRequest(
                "Recipient address is required".to_string(),
            ));
        }
        let to = EvmAddress::parse(recipient)
            .map_err(|_| TransferError::InvalidRequest("Invalid recipient address".to_string()))?;

        if self.amount.trim().is_empty() {
            return Err(TransferError::InvalidRequest("Amount is required".to_string()));
        }
        let amount = parse_units(&self.amount, decimals)
            .map_err(|e| TransferError::InvalidRequest(e.to_string()))?;

        TransferRequest::new(to, amount)
    }
}

/// A validated native transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub to: Address,
    /// Base units, strictly positive
    pub amount: U256,
}

impl TransferRequest {
    pub fn new(to: Address, amount: U256) -> Result<Self, TransferError> {
        if amount.is_zero() {
            return Err(TransferError::InvalidRequest(
                "Amount must be greater than zero".to_string(),
            ));
        }
        Ok(Self { to, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    fn invalid(draft: TransferDraft) -> bool {
        matches!(draft.validate(18), Err(TransferError::InvalidRequest(_)))
    }

    #[test]
    fn test_valid_draft() {
        let request = TransferDraft::new(RECIPIENT, "0.5").validate(18).unwrap();
        assert_eq!(request.to, RECIPIENT.parse::<Address>().unwrap());
        assert_eq!(request.amount, U256::from(500_000_000_000_000_000u128));
    }

    #[test]
    fn test_lowercase_recipient_accepted() {
        let lower = RECIPIENT.to_lowercase();
        assert!(TransferDraft::new(lower, "1").validate(18).is_ok());
    }

    #[test]
    fn test_invalid_drafts() {
        assert!(invalid(TransferDraft::new("", "1")));
        assert!(invalid(TransferDraft::new("   ", "1")));
        assert!(invalid(TransferDraft::new("0x1234", "1")));
        assert!(invalid(TransferDraft::new(RECIPIENT, "")));
        assert!(invalid(TransferDraft::new(RECIPIENT, "0")));
        assert!(invalid(TransferDraft::new(RECIPIENT, "0.0")));
        assert!(invalid(TransferDraft::new(RECIPIENT, "-1")));
        assert!(invalid(TransferDraft::new(RECIPIENT, "abc")));
        // Bad EIP-55 checksum
        assert!(invalid(TransferDraft::new(
            "0x70997970c51812dc3A010C7d01b50e0d17dc79C8",
            "1"
        )));
    }

    #[test]
    fn test_clear() {
        let mut draft = TransferDraft::new(RECIPIENT, "1");
        assert!(!draft.is_empty());
        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft, TransferDraft::default());
    }
}
