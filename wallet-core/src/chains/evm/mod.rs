// wallet-core/src/chains/evm/mod.rs

//! Ethereum account chain support
//!
//! # Key Features
//! - **Address Derivation**: EIP-55 checksummed address generation via [`EvmAddress`].
//! - **Signing**: native transfers (EIP-155) via [`EvmSigner`].
//! - **Account Derivation**: seed + index → (address, signer) via [`derive_account`].

pub mod address;
pub mod signer;

pub use address::EvmAddress;
pub use signer::{EvmSigner, NativeTransfer};

use crate::crypto::Seed;
use crate::error::WalletResult;

/// Derive the account at `m/44'/60'/0'/0/{index}`.
///
/// Returns the checksummed address together with a signer bound to
/// `chain_id`. The signer is meant to be used once and dropped.
pub fn derive_account(seed: &Seed, index: u32, chain_id: u64) -> WalletResult<(String, EvmSigner)> {
    let signer = EvmSigner::from_seed(seed, index, chain_id)?;
    let address = signer.address_string();
    tracing::debug!(index, %address, "derived evm account");
    Ok((address, signer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::derive_seed;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_derive_account_deterministic() {
        let seed = derive_seed(TEST_MNEMONIC).unwrap();
        let (a1, _) = derive_account(&seed, 3, 1).unwrap();
        let (a2, _) = derive_account(&seed, 3, 1).unwrap();
        assert_eq!(a1, a2);
    }

    #[test]
    fn test_index_one_known_vector() {
        let seed = derive_seed(TEST_MNEMONIC).unwrap();
        let (address, signer) = derive_account(&seed, 1, 1).unwrap();
        assert_eq!(address, "0x6Fac4D18c912343BF86fa7049364Dd4E424Ab9C0");
        assert_eq!(signer.address_string(), address);
    }

    #[test]
    fn test_hardened_range_index_rejected() {
        let seed = derive_seed(TEST_MNEMONIC).unwrap();
        assert!(derive_account(&seed, 0x8000_0000, 1).is_err());
    }
}
