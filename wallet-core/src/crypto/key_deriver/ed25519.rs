// wallet-core/src/crypto/key_deriver/ed25519.rs
//
// Ed25519 Key Derivation: SLIP-0010 Standard
//
// Used by the ed25519 chain (Solana).
// Algorithm: HMAC-SHA512 (unlike BIP-32, hardened derivation only)
// Reference: https://github.com/satoshilabs/slips/blob/master/slip-0010.md
//
// SLIP-0010 for ed25519 ONLY defines hardened child derivation.
// Every level in the path MUST be hardened ('):
//   m/44'/501'/0'/0' (OK)    m/44'/501'/0'/0 (INVALID)

use crate::crypto::paths::HARDENED_OFFSET;
use crate::error::{CryptoError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// Ed25519 Key Deriver: SLIP-0010 Standard
///
/// # Differences from secp256k1 (BIP-32)
/// - Master key HMAC key: "ed25519 seed" (instead of "Bitcoin seed")
/// - Hardened derivation only (index >= 2^31)
/// - No key range check: any 32 bytes is a valid ed25519 secret
///
/// # Security
/// - Private key + chain code are zeroized after every level
pub struct Ed25519Deriver;

impl Ed25519Deriver {
    /// SLIP-0010 master key seed constant
    const MASTER_SECRET: &'static [u8] = b"ed25519 seed";

    /// Derive a 32-byte ed25519 secret from seed + path
    ///
    /// # Arguments
    /// * `seed` - Master entropy. SLIP-0010 accepts any length; the wallet
    ///   passes the first 32 bytes of the BIP-39 seed.
    /// * `path` - Derivation path, all levels hardened (e.g. "m/44'/501'/0'/0'")
    pub fn derive(seed: &[u8], path: &str) -> WalletResult<Zeroizing<[u8; 32]>> {
        let indices = Self::parse_path(path)?;

        // I = HMAC-SHA512(Key = "ed25519 seed", Data = seed)
        let (mut key, mut chain_code) = Self::hmac_split(Self::MASTER_SECRET, &[seed])?;

        // I = HMAC-SHA512(Key = chain_code, Data = 0x00 || key || ser32(index'))
        for index in indices {
            let hardened = (index | HARDENED_OFFSET).to_be_bytes();
            let (child_key, child_chain) =
                Self::hmac_split(&chain_code, &[&[0x00u8][..], &key[..], &hardened[..]])?;
            key.zeroize();
            chain_code.zeroize();
            key = child_key;
            chain_code = child_chain;
        }

        chain_code.zeroize();
        Ok(Zeroizing::new(key))
    }

    /// HMAC-SHA512 over `parts`, split into (IL, IR)
    fn hmac_split(key: &[u8], parts: &[&[u8]]) -> WalletResult<([u8; 32], [u8; 32])> {
        let mut mac = HmacSha512::new_from_slice(key).map_err(|e| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "HMAC init failed: {}",
                e
            )))
        })?;
        for part in parts {
            mac.update(part);
        }
        let result = mac.finalize().into_bytes();

        // Copy into a stack buffer we control, then wipe it
        let mut buf = [0u8; 64];
        buf.copy_from_slice(&result);

        let mut il = [0u8; 32];
        let mut ir = [0u8; 32];
        il.copy_from_slice(&buf[..32]);
        ir.copy_from_slice(&buf[32..]);
        buf.zeroize();

        Ok((il, ir))
    }

    /// Parse "m/44'/501'/0'/0'" into [44, 501, 0, 0]
    ///
    /// Every segment must carry a hardened marker (' or h).
    fn parse_path(path: &str) -> WalletResult<Vec<u32>> {
        let path = path.trim();

        let segments = path.strip_prefix("m/").ok_or_else(|| {
            WalletError::Crypto(CryptoError::DerivationFailed(format!(
                "Path must start with 'm/': {}",
                path
            )))
        })?;

        if segments.is_empty() {
            return Err(WalletError::Crypto(CryptoError::DerivationFailed(
                "Empty derivation path".to_string(),
            )));
        }

        let mut indices = Vec::new();
        for segment in segments.split('/').map(str::trim) {
            let num_str = segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
                .ok_or_else(|| {
                    WalletError::Crypto(CryptoError::DerivationFailed(format!(
                        "Ed25519 SLIP-0010 requires ALL levels to be hardened. Invalid segment: '{}'",
                        segment
                    )))
                })?;

            let index: u32 = num_str.parse().map_err(|e| {
                WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Invalid index '{}': {}",
                    num_str, e
                )))
            })?;

            if index >= HARDENED_OFFSET {
                return Err(WalletError::Crypto(CryptoError::DerivationFailed(format!(
                    "Index {} out of range for hardened derivation",
                    index
                ))));
            }

            indices.push(index);
        }

        Ok(indices)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;
    use ed25519_dalek::SigningKey;

    const TEST_SEED: &str = "16270f7b026afe7a3746efbfcf43e083500951db9e2699d1e4f372515dabcc80459b9181c3937b5faa4b8f7602f886553d2c32c5f12f3331cef40153aead4de6";

    // SLIP-0010 test vector 1 for ed25519
    const SLIP10_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    #[test]
    fn test_slip0010_vector_master() {
        let seed = hex::decode(SLIP10_SEED).unwrap();
        let (key, chain) = Ed25519Deriver::hmac_split(b"ed25519 seed", &[seed.as_slice()]).unwrap();
        assert_eq!(
            hex::encode(key),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(chain),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
    }

    #[test]
    fn test_slip0010_vector_first_child() {
        let seed = hex::decode(SLIP10_SEED).unwrap();
        let key = Ed25519Deriver::derive(&seed, "m/0'").unwrap();
        assert_eq!(
            hex::encode(*key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );

        let keypair = SigningKey::from_bytes(&Ed25519Deriver::derive(&seed, "m/0h").unwrap());
        assert_eq!(
            hex::encode(keypair.verifying_key().to_bytes()),
            "8c8a13df77a28f3445213a0f432fde644acaa215fc72dcdf300d5efaa85d350c"
        );
    }

    #[test]
    fn test_consistency() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let k1 = Ed25519Deriver::derive(&seed[..32], DerivationPaths::SOLANA_0).unwrap();
        let k2 = Ed25519Deriver::derive(&seed[..32], DerivationPaths::SOLANA_0).unwrap();
        assert_eq!(&*k1, &*k2);
    }

    #[test]
    fn test_different_accounts() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let k0 = Ed25519Deriver::derive(&seed, &DerivationPaths::solana(0)).unwrap();
        let k1 = Ed25519Deriver::derive(&seed, &DerivationPaths::solana(1)).unwrap();
        let k2 = Ed25519Deriver::derive(&seed, &DerivationPaths::solana(2)).unwrap();
        assert_ne!(&*k0, &*k1);
        assert_ne!(&*k1, &*k2);
    }

    #[test]
    fn test_seed_length_changes_key() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let full = Ed25519Deriver::derive(&seed, DerivationPaths::SOLANA_0).unwrap();
        let half = Ed25519Deriver::derive(&seed[..32], DerivationPaths::SOLANA_0).unwrap();
        assert_ne!(&*full, &*half);
    }

    #[test]
    fn test_non_hardened_path_rejected() {
        let seed = hex::decode(TEST_SEED).unwrap();
        let result = Ed25519Deriver::derive(&seed, "m/44'/501'/0'/0");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("hardened"));
    }

    #[test]
    fn test_invalid_path_format() {
        let seed = hex::decode(TEST_SEED).unwrap();
        assert!(Ed25519Deriver::derive(&seed, "invalid").is_err());
        assert!(Ed25519Deriver::derive(&seed, "44'/501'/0'").is_err()); // Missing m/
        assert!(Ed25519Deriver::derive(&seed, "m/").is_err());
        assert!(Ed25519Deriver::derive(&seed, "m/2147483648'").is_err());
    }

    #[test]
    fn test_hardened_markers() {
        assert_eq!(
            Ed25519Deriver::parse_path("m/44h/501h/7h/0h").unwrap(),
            Ed25519Deriver::parse_path("m/44'/501'/7'/0'").unwrap()
        );
    }
}
