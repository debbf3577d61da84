// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - HD wallet path generator
// BIP-44 (Purpose), SLIP-44 (Coin Types), SLIP-0010 (ed25519, hardened only)

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    // ---- secp256k1 chains ----
    pub const ETHEREUM: u32 = 60;

    // ---- ed25519 chains ----
    pub const SOLANA: u32 = 501;
}

/// BIP-44 purpose level
pub const PURPOSE_BIP44: u32 = 44;

/// BIP-44 external chain (receiving addresses)
pub const EXTERNAL_CHAIN: u32 = 0;

/// First index that can only be derived as a hardened child
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// DERIVATION PATHS
// =============================================================================
/// Derivation paths used by the wallet
///
/// # Conventions
/// - BIP-44: `m/44'/60'/0'/0/index` (secp256k1, last two levels non-hardened)
/// - SLIP-0010: `m/44'/501'/index'/0'` (ed25519, every level hardened)
pub struct DerivationPaths;

impl DerivationPaths {
    // =========================================================================
    // EVM (secp256k1): BIP-44, coin_type = 60
    // =========================================================================
    pub const EVM_0: &'static str = "m/44'/60'/0'/0/0";

    /// EVM path with custom address index
    #[inline]
    pub fn evm(index: u32) -> String {
        Self::bip44(PURPOSE_BIP44, coin_type::ETHEREUM, 0, EXTERNAL_CHAIN, index)
    }

    // =========================================================================
    // SOLANA (ed25519): SLIP-0010 (all levels hardened)
    // The wallet index sits at the account level, followed by a fixed 0'.
    // =========================================================================
    pub const SOLANA_0: &'static str = "m/44'/501'/0'/0'";

    #[inline]
    pub fn solana(index: u32) -> String {
        Self::ed25519_path(coin_type::SOLANA, index, &[0])
    }

    // =========================================================================
    // BUILDERS
    // =========================================================================
    /// BIP-44 path for secp256k1 chains
    ///
    /// # Arguments
    /// * `purpose` - 44 for BIP-44
    /// * `coin_type` - SLIP-44 coin type
    /// * `account` - Account index (hardened)
    /// * `change` - 0 = external, 1 = internal
    /// * `index` - Address index (non-hardened)
    #[inline]
    pub fn bip44(purpose: u32, coin_type: u32, account: u32, change: u32, index: u32) -> String {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            purpose, coin_type, account, change, index
        )
    }

    /// SLIP-0010 path for ed25519, every level forced hardened
    ///
    /// - Solana: `ed25519_path(501, 0, &[0])` -> m/44'/501'/0'/0'
    pub fn ed25519_path(coin_type: u32, account: u32, sub_paths: &[u32]) -> String {
        let mut path = format!("m/{}'/{}'/{}'", PURPOSE_BIP44, coin_type, account);
        for &idx in sub_paths {
            path.push_str(&format!("/{}'", idx));
        }
        path
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evm_paths() {
        assert_eq!(DerivationPaths::EVM_0, "m/44'/60'/0'/0/0");
        assert_eq!(DerivationPaths::evm(0), DerivationPaths::EVM_0);
        assert_eq!(DerivationPaths::evm(5), "m/44'/60'/0'/0/5");
    }

    #[test]
    fn test_solana_paths() {
        assert_eq!(DerivationPaths::solana(0), DerivationPaths::SOLANA_0);
        assert_eq!(DerivationPaths::solana(2), "m/44'/501'/2'/0'");
    }

    #[test]
    fn test_custom_builders() {
        assert_eq!(DerivationPaths::bip44(44, 60, 0, 0, 7), "m/44'/60'/0'/0/7");
        assert_eq!(DerivationPaths::ed25519_path(501, 3, &[]), "m/44'/501'/3'");
    }
}
