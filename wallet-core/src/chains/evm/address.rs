// wallet-core/src/chains/evm/address.rs
//
// EVM Address Module
// EIP-55 (Checksum), Keccak-256, secp256k1

use crate::error::{CryptoError, WalletError, WalletResult};
use alloy::primitives::Address;
use k256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::{Zeroize, Zeroizing};

/// EVM Address Generator
///
/// # Flow:  Private Key (32B) → Public Key (64B) → Keccak256 → Address (20B)
pub struct EvmAddress;

impl EvmAddress {
    /// Derive the 20 address bytes from a private key
    ///
    /// # Algorithm (Ethereum Yellow Paper)
    /// 1. `priv_key` (32B) → secp256k1 → `pub_key` (uncompressed, 65B)
    /// 2. Drop the 0x04 prefix → 64B
    /// 3. Keccak-256 → 32B
    /// 4. `hash[12..32]` → address (20B)
    pub fn derive_bytes(priv_key: &[u8]) -> WalletResult<[u8; 20]> {
        let secret_key = SecretKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })?;

        let public_key = secret_key.public_key();
        let encoded = Zeroizing::new(public_key.to_encoded_point(false));
        let pub_key_raw = &encoded.as_bytes()[1..];

        let mut hasher = Keccak::v256();
        let mut hash = [0u8; 32];
        hasher.update(pub_key_raw);
        hasher.finalize(&mut hash);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        hash.zeroize();

        Ok(address)
    }

    /// EIP-55 checksummed address string, e.g. `"0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B"`
    #[inline]
    pub fn derive(priv_key: &[u8]) -> WalletResult<String> {
        let bytes = Self::derive_bytes(priv_key)?;
        Ok(Address::from_slice(&bytes).to_checksum(None))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Format/checksum check, no network.
    ///
    /// Accepts 40 hex chars with optional `0x`. All-lowercase and all-uppercase
    /// forms carry no checksum; a mixed-case string must match EIP-55.
    pub fn is_valid(address: &str) -> bool {
        let hex_part = address.strip_prefix("0x").unwrap_or(address);
        if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }

        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            return Address::parse_checksummed(format!("0x{}", hex_part), None).is_ok();
        }

        address.parse::<Address>().is_ok()
    }

    /// Parse a validated address
    pub fn parse(address: &str) -> WalletResult<Address> {
        if !Self::is_valid(address) {
            return Err(WalletError::Validation(
                "Invalid Ethereum address".to_string(),
            ));
        }
        address
            .parse::<Address>()
            .map_err(|_| WalletError::Validation("Invalid Ethereum address".to_string()))
    }

    /// Normalize to EIP-55 checksum format
    pub fn to_checksum(address: &str) -> WalletResult<String> {
        Ok(Self::parse(address)?.to_checksum(None))
    }

    /// Case-insensitive comparison via byte equality
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (addr1.parse::<Address>(), addr2.parse::<Address>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
