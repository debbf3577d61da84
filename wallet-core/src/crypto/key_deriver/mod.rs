// wallet-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - Multi-Curve Support
//
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │     ┌──────────────┴──────────────┐             │
// │     ▼                             ▼             │
// │  secp256k1 (BIP-32)        ed25519 (SLIP-0010)  │
// │  m/44'/60'/0'/0/i          m/44'/501'/i'/0'     │
// │  └─ Ethereum               └─ Solana            │
// │                               (seed[..32])      │
// └─────────────────────────────────────────────────┘

pub mod ed25519;
pub mod secp256k1;

pub use ed25519::Ed25519Deriver;
pub use secp256k1::Secp256k1Deriver;

use crate::error::{CryptoError, WalletError, WalletResult};
use zeroize::Zeroizing;

// =============================================================================
// COMMON TYPES
// =============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveType {
    /// secp256k1: Ethereum
    Secp256k1,
    /// Ed25519: Solana
    Ed25519,
}

/// Private key + the path it came from
#[derive(Debug)]
pub struct DerivedKey {
    /// Private key bytes (32 bytes, zeroized on drop)
    pub private_key: Zeroizing<[u8; 32]>,
    pub curve: CurveType,
    pub path: String,
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Entry point for key derivation on either curve
pub struct KeyDeriver;

impl KeyDeriver {
    /// BIP-32 and SLIP-0010 both accept 128..=512 bits of master entropy
    const MIN_SEED_LEN: usize = 16;
    const MAX_SEED_LEN: usize = 64;

    /// Derive a private key on the given curve
    ///
    /// # Arguments
    /// * `seed` - master entropy (16..=64 bytes)
    /// * `path` - Derivation path (e.g., "m/44'/60'/0'/0/0")
    /// * `curve` - secp256k1 or ed25519
    pub fn derive(seed: &[u8], path: &str, curve: CurveType) -> WalletResult<DerivedKey> {
        Self::validate_seed(seed)?;

        let private_key = match curve {
            CurveType::Secp256k1 => Secp256k1Deriver::derive(seed, path)?,
            CurveType::Ed25519 => Ed25519Deriver::derive(seed, path)?,
        };

        Ok(DerivedKey {
            private_key,
            curve,
            path: path.to_string(),
        })
    }

    #[inline]
    fn validate_seed(seed: &[u8]) -> WalletResult<()> {
        if !(Self::MIN_SEED_LEN..=Self::MAX_SEED_LEN).contains(&seed.len()) {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid seed length: expected {}..={} bytes, got {}",
                Self::MIN_SEED_LEN,
                Self::MAX_SEED_LEN,
                seed.len()
            ))));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;

    const TEST_SEED: &str = "16270f7b026afe7a3746efbfcf43e083500951db9e2699d1e4f372515dabcc80459b9181c3937b5faa4b8f7602f886553d2c32c5f12f3331cef40153aead4de6";

    #[test]
    fn test_unified_secp256k1() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = KeyDeriver::derive(&seed, DerivationPaths::EVM_0, CurveType::Secp256k1).unwrap();
        assert_eq!(key.curve, CurveType::Secp256k1);
        assert_eq!(key.path, DerivationPaths::EVM_0);
        assert_eq!(
            &*key.private_key,
            &*Secp256k1Deriver::derive(&seed, DerivationPaths::EVM_0).unwrap()
        );
    }

    #[test]
    fn test_unified_ed25519_half_seed() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key =
            KeyDeriver::derive(&seed[..32], DerivationPaths::SOLANA_0, CurveType::Ed25519).unwrap();
        assert_eq!(key.curve, CurveType::Ed25519);
        assert_eq!(key.private_key.len(), 32);
    }

    #[test]
    fn test_invalid_seed_length() {
        assert!(KeyDeriver::derive(&[0u8; 8], DerivationPaths::EVM_0, CurveType::Secp256k1).is_err());
        assert!(KeyDeriver::derive(&[0u8; 65], DerivationPaths::EVM_0, CurveType::Secp256k1).is_err());
        assert!(KeyDeriver::derive(&[], DerivationPaths::SOLANA_0, CurveType::Ed25519).is_err());
    }

    #[test]
    fn test_different_curves_produce_different_keys() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let secp = KeyDeriver::derive(&seed, "m/44'/60'/0'/0/0", CurveType::Secp256k1).unwrap();
        let ed = KeyDeriver::derive(&seed, "m/44'/60'/0'/0'", CurveType::Ed25519).unwrap();
        assert_ne!(&*secp.private_key, &*ed.private_key);
    }
}
