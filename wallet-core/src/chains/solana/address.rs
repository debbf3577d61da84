// wallet-core/src/chains/solana/address.rs
//
// Solana Address Module
// SLIP-0010 ed25519, Base58 public key

use crate::chains::Chain;
use crate::crypto::Seed;
use crate::error::{WalletError, WalletResult};
use ed25519_dalek::SigningKey;

/// Solana Address Generator
///
/// # Flow:  Seed[..32] → SLIP-0010 m/44'/501'/i'/0' → ed25519 pubkey (32B) → Base58
///
/// Only the first half of the BIP-39 seed is used as master entropy. Wallets
/// that feed the full 64 bytes produce different addresses for the same phrase.
pub struct SolanaAddress;

impl SolanaAddress {
    pub const PUBLIC_KEY_LEN: usize = 32;

    /// Address of wallet `index`
    pub fn derive(seed: &Seed, index: u32) -> WalletResult<String> {
        let key = Chain::Solana.derive_key(seed, index)?;
        let address = Self::from_secret(&key.private_key);
        tracing::debug!(index, %address, "derived solana address");
        Ok(address)
    }

    /// Base58 of the public key belonging to a 32-byte ed25519 secret
    pub fn from_secret(secret: &[u8; 32]) -> String {
        let signing_key = SigningKey::from_bytes(secret);
        bs58::encode(signing_key.verifying_key().as_bytes()).into_string()
    }

    /// Base58 that decodes to exactly 32 bytes
    pub fn is_valid(address: &str) -> bool {
        matches!(
            bs58::decode(address).into_vec(),
            Ok(bytes) if bytes.len() == Self::PUBLIC_KEY_LEN
        )
    }

    pub fn parse(address: &str) -> WalletResult<[u8; 32]> {
        let bytes = bs58::decode(address)
            .into_vec()
            .map_err(|_| WalletError::Validation("Invalid Solana address".to_string()))?;
        bytes
            .try_into()
            .map_err(|_| WalletError::Validation("Invalid Solana address".to_string()))
    }
}
