// wallet-core/src/wallet/mod.rs

//! Per-chain wallet lists derived from the session phrase.
//!
//! Each [`WalletRegistry`] hands out derivation indices in increasing order and
//! tracks which entry is selected. Deleting an entry never frees its index.

pub mod registry;

pub use registry::{WalletEntry, WalletRegistry};
