// wallet-core/src/lib.rs

//! HD wallet core
//!
//! - [`crypto`]: BIP-39 phrase and seed, BIP-32 / SLIP-0010 key derivation
//! - [`chains`]: Ethereum (secp256k1) and Solana (ed25519) addresses, EVM signing
//! - [`wallet`]: per-chain wallet registries
//! - [`network`]: provider traits and JSON-RPC implementations
//! - [`transfer`]: the native transfer state machine
//! - [`api`]: session facade and logging setup

pub mod api;
pub mod chains;
pub mod crypto;
pub mod error;
pub mod network;
pub mod transfer;
pub mod wallet;

pub use api::{init_core, WalletSession};
pub use chains::{Chain, EvmChainConfig, SolanaChainConfig};
pub use crypto::{derive_seed, Seed, WalletMnemonic, WordCount};
pub use error::{TransferError, WalletError, WalletResult};
pub use network::{Balance, BalanceOracle, NetworkProvider};
pub use transfer::{FeeQuote, QuoteOutcome, TransferEngine, TransferState};
pub use wallet::{WalletEntry, WalletRegistry};
