// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic & Seed**: BIP-39 phrases and PBKDF2 seeds via [`WalletMnemonic`] / [`derive_seed`].
//! - **Key Derivation**: secp256k1 (BIP-32) and ed25519 (SLIP-0010) via [`KeyDeriver`].
//! - **Derivation Paths**: BIP-44 / SLIP-0010 path builders via [`DerivationPaths`].

pub mod key_deriver;
pub mod mnemonic;
pub mod paths;

pub use key_deriver::{CurveType, DerivedKey, KeyDeriver};
pub use mnemonic::{derive_seed, Seed, WalletMnemonic, WordCount};
pub use paths::DerivationPaths;
