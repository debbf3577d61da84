// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation: BIP-32 / BIP-44
//
// Used by the account chain (Ethereum).
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use crate::error::{CryptoError, WalletError, WalletResult};
use bip32::{DerivationPath, XPrv};
use std::str::FromStr;
use zeroize::Zeroizing;

/// secp256k1 Key Deriver: BIP-32 Standard
///
/// # Security
/// - Private keys are wrapped in `Zeroizing<[u8; 32]>`
/// - Intermediate extended keys are dropped (and zeroized by `bip32`) level by level
///
/// # Invalid intermediate keys
/// BIP-32 says a child whose tweak is >= n or yields the point at infinity is
/// invalid and the caller should move on to the next index. The probability
/// is below 2^-127; we surface it as `DerivationFailed` and leave the skip to
/// the caller.
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Derive a private key from seed + path
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (16..=64 bytes)
    /// * `path` - Derivation path (e.g. "m/44'/60'/0'/0/0")
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
        let derivation_path = DerivationPath::from_str(path).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Invalid path '{}': {}",
                path, e
            )))
        })?;

        let root_xprv = XPrv::new(seed).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Failed to create master key: {}",
                e
            )))
        })?;

        let mut child = root_xprv;
        for child_num in derivation_path {
            child = child.derive_child(child_num).map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Child derivation failed at {}: {}",
                    child_num, e
                )))
            })?;
        }

        let key_bytes: [u8; 32] = child.private_key().to_bytes().into();
        Ok(Zeroizing::new(key_bytes))
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
    fn test_derive_evm_key() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let key = Secp256k1Deriver::derive(&seed, DerivationPaths::EVM_0).unwrap();
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn test_bip32_vector_1_master() {
        // BIP-32 test vector 1, chain m
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let xprv = XPrv::new(&seed).unwrap();
        let key: [u8; 32] = xprv.private_key().to_bytes().into();
        assert_eq!(
            hex::encode(key),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
    }

    #[test]
    fn test_consistency() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let k1 = Secp256k1Deriver::derive(&seed, DerivationPaths::EVM_0).unwrap();
        let k2 = Secp256k1Deriver::derive(&seed, DerivationPaths::EVM_0).unwrap();
        assert_eq!(&*k1, &*k2);
    }

    #[test]
    fn test_different_indices_different_keys() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let keys: Vec<_> = (0..5)
            .map(|i| Secp256k1Deriver::derive(&seed, &DerivationPaths::evm(i)).unwrap())
            .collect();
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                assert_ne!(&*keys[i], &*keys[j], "Key {} and {} should differ", i, j);
            }
        }
    }

    #[test]
    fn test_index_beyond_non_hardened_range_fails() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let path = DerivationPaths::evm(0x8000_0000);
        assert!(Secp256k1Deriver::derive(&seed, &path).is_err());
    }

    #[test]
    fn test_malformed_path_fails() {
        let seed = hex::decode(TEST_SEED).unwrap();
        assert!(Secp256k1Deriver::derive(&seed, "invalid").is_err());
    }
}
