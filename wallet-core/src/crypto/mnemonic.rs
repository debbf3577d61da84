// wallet-core/src/crypto/mnemonic.rs
//
// Mnemonic Module - BIP-39 recovery phrase + seed derivation
// Standard: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 (Seed Derivation)

use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::Mnemonic;
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Supported phrase lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 15 words (160-bit entropy)
    Fifteen = 15,
    /// 18 words (192-bit entropy)
    Eighteen = 18,
    /// 21 words (224-bit entropy)
    TwentyOne = 21,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::Fifteen => 20,
            WordCount::Eighteen => 24,
            WordCount::TwentyOne => 28,
            WordCount::TwentyFour => 32,
        }
    }
}

// =============================================================================
// SEED
// =============================================================================

/// 64-byte BIP-39 seed.
///
/// Recomputed from the phrase whenever it is needed and wiped on drop. Not
/// `Clone`: callers borrow it for the duration of one derivation.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 64]);

impl Seed {
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// First half of the seed. The ed25519 chain keys its SLIP-0010 master
    /// from these 32 bytes only.
    #[inline]
    pub fn first_half(&self) -> &[u8] {
        &self.0[..32]
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

/// Turn a phrase into its seed (empty passphrase).
///
/// Validates word count, wordlist membership and checksum first, so it is
/// safe to call on untrusted input.
pub fn derive_seed(phrase: &str) -> WalletResult<Seed> {
    WalletMnemonic::from_phrase(phrase)?.to_seed(None)
}

// =============================================================================
// MNEMONIC
// =============================================================================

/// Session recovery phrase
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: phrase bytes are overwritten when the value is dropped
/// - **CSPRNG**: entropy comes from `OsRng`
/// - **No Debug Leak**: custom Debug impl never prints the phrase
/// - **No Clone**: the session owns the only copy
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    phrase: String,
    word_count: usize,
}

// Custom Debug - NEVER print the phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &self.word_count)
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Generate a fresh 12-word phrase (128-bit entropy)
    pub fn new() -> WalletResult<Self> {
        Self::generate(WordCount::Twelve)
    }

    /// Generate a phrase of the requested length from `OsRng`
    pub fn generate(word_count: WordCount) -> WalletResult<Self> {
        let entropy_size = word_count.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes)
        let mut entropy = [0u8; 32];
        OsRng.fill_bytes(&mut entropy[..entropy_size]);

        let mnemonic = Mnemonic::from_entropy(&entropy[..entropy_size])
            .map_err(|e| WalletError::Mnemonic(MnemonicError::Bip39Error(e.to_string())));

        entropy.zeroize();

        Ok(Self {
            phrase: mnemonic?.to_string(),
            word_count: word_count as usize,
        })
    }

    /// Restore from an existing phrase
    ///
    /// # Validation
    /// - word count (12, 15, 18, 21, 24)
    /// - every word is in the BIP-39 English wordlist
    /// - checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let count = normalized.len();

        if !matches!(count, 12 | 15 | 18 | 21 | 24) {
            return Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(
                count,
            )));
        }

        let normalized_phrase = normalized.join(" ");
        Mnemonic::parse(&normalized_phrase).map_err(Self::map_bip39_error)?;

        Ok(Self {
            phrase: normalized_phrase,
            word_count: count,
        })
    }

    fn map_bip39_error(e: bip39::Error) -> WalletError {
        let msg = e.to_string();
        if msg.contains("invalid word") || msg.contains("unknown word") {
            WalletError::Mnemonic(MnemonicError::UnknownWord(msg))
        } else if msg.contains("checksum") {
            WalletError::Mnemonic(MnemonicError::ChecksumFailed)
        } else {
            WalletError::Mnemonic(MnemonicError::Bip39Error(msg))
        }
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Raw phrase
    ///
    /// # Warning
    /// Never log this value.
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// PBKDF2-HMAC-SHA512 (2048 rounds) seed
    ///
    /// # Arguments
    /// * `passphrase` - Optional BIP-39 passphrase. The wallet UI always uses
    ///   the empty passphrase.
    pub fn to_seed(&self, passphrase: Option<&str>) -> WalletResult<Seed> {
        let password = passphrase.unwrap_or("");
        let mnemonic = Mnemonic::parse(&self.phrase).map_err(Self::map_bip39_error)?;
        let bytes = Zeroizing::new(mnemonic.to_seed(password));
        Ok(Seed(*bytes))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Full validation: word count, wordlist, checksum
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
