use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Provider Error: {0}")]
    Provider(#[from] ProviderError),

    #[error("No recovery phrase set. Create or import a seed phrase first.")]
    NoMnemonic,

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Config Error: {0}")]
    Config(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12, 15, 18, 21 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// Coded failure reported by a network collaborator.
///
/// `code` follows the provider's vocabulary (see [`codes`]); `message` is the
/// raw upstream text and is only ever logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct ProviderError {
    pub code: String,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error codes emitted by the bundled providers.
pub mod codes {
    pub const INSUFFICIENT_FUNDS: &str = "INSUFFICIENT_FUNDS";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const ACTION_REJECTED: &str = "ACTION_REJECTED";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const BAD_DATA: &str = "BAD_DATA";
    pub const TIMEOUT: &str = "TIMEOUT";
}

// =============================================================================
// TRANSFER FAILURES
// =============================================================================

/// Reason a transfer did not complete.
///
/// This is the only error surface of the transfer engine; anything coming out
/// of the network or the key derivation is folded into one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("Invalid recovery phrase")]
    InvalidPhrase,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Insufficient balance for value + gas")]
    InsufficientFunds,

    #[error("Network error. Try again.")]
    NetworkError,

    #[error("Transaction rejected.")]
    UserRejected,

    #[error("Transaction reverted ({tx_hash}). Funds spent on gas are not refunded.")]
    Reverted { tx_hash: String },

    #[error("Transaction failed.")]
    TransferFailed,

    /// Broadcast went out but the outcome was never observed
    #[error("Transaction {tx_hash} was sent but not confirmed. Check it before sending again.")]
    Unconfirmed { tx_hash: String },

    #[error("A transfer is already in progress")]
    AlreadyInProgress,

    #[error("Key derivation failed: {0}")]
    Derivation(String),
}

impl TransferError {
    /// Whether retrying the same request blindly is safe.
    ///
    /// Only transport failures before broadcast qualify. After broadcast
    /// (`Reverted`, `Unconfirmed`) a retry can send the funds twice.
    pub fn is_retry_safe(&self) -> bool {
        matches!(self, TransferError::NetworkError)
    }
}

/// Map a provider error code to a transfer failure reason. Unknown codes fall
/// into `TransferFailed`.
pub fn classify_provider_code(code: &str) -> TransferError {
    match code {
        codes::INSUFFICIENT_FUNDS => TransferError::InsufficientFunds,
        codes::NETWORK_ERROR => TransferError::NetworkError,
        codes::ACTION_REJECTED => TransferError::UserRejected,
        _ => TransferError::TransferFailed,
    }
}

impl From<WalletError> for TransferError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Provider(e) => classify_provider_code(&e.code),
            WalletError::Mnemonic(_) | WalletError::NoMnemonic => TransferError::InvalidPhrase,
            WalletError::Crypto(CryptoError::DerivationFailed(msg))
            | WalletError::Crypto(CryptoError::InvalidKeyFormat(msg)) => {
                TransferError::Derivation(msg)
            }
            WalletError::Validation(msg) => TransferError::InvalidRequest(msg),
            WalletError::Crypto(CryptoError::SigningFailed(_)) | WalletError::Config(_) => {
                TransferError::TransferFailed
            }
        }
    }
}
