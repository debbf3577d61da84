// wallet-core/src/chains/solana/mod.rs

//! Solana (ed25519) chain support
//!
//! Addresses only; the wallet does not sign or send on this chain.

pub mod address;

pub use address::SolanaAddress;
