// wallet-core/src/transfer/state.rs

use crate::error::TransferError;

/// Where the current transfer attempt is
///
/// ```text
/// Idle ──submit──▶ Signing ──broadcast──▶ Pending ──receipt ok──▶ Confirmed
///                     │                      │
///                     └──────failure─────────┴──────▶ Failed(reason)
/// Confirmed | Failed ──submit──▶ Signing
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransferState {
    #[default]
    Idle,
    /// Deriving the signer, checking balance and fee, signing
    Signing,
    /// Broadcast, waiting for the receipt
    Pending { tx_hash: String },
    Confirmed { tx_hash: String },
    Failed(TransferError),
}

impl TransferState {
    /// A second submit is refused in these states
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, TransferState::Signing | TransferState::Pending { .. })
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferState::Confirmed { .. } | TransferState::Failed(_))
    }

    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            TransferState::Pending { tx_hash } | TransferState::Confirmed { tx_hash } => {
                Some(tx_hash)
            }
            TransferState::Failed(
                TransferError::Reverted { tx_hash } | TransferError::Unconfirmed { tx_hash },
            ) => Some(tx_hash),
            _ => None,
        }
    }
}
