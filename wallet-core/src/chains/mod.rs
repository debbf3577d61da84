// src/chains/mod.rs
pub mod evm;
pub mod solana;

use crate::crypto::{CurveType, DerivationPaths, DerivedKey, KeyDeriver, Seed};
use crate::error::{WalletError, WalletResult};
use serde::{Deserialize, Serialize};

pub use evm::{EvmAddress, EvmSigner};
pub use solana::SolanaAddress;

/// Chains the wallet derives addresses for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Account chain, secp256k1, can send
    Ethereum,
    /// ed25519 chain, receive/display only
    Solana,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Ethereum, Chain::Solana];

    /// Master entropy this chain derives from: the full seed, or its first
    /// 32 bytes for the ed25519 chain
    pub fn master_entropy(self, seed: &Seed) -> &[u8] {
        match self {
            Chain::Ethereum => seed.as_bytes(),
            Chain::Solana => seed.first_half(),
        }
    }

    /// Private key of wallet `index` on this chain
    pub fn derive_key(self, seed: &Seed, index: u32) -> WalletResult<DerivedKey> {
        KeyDeriver::derive(
            self.master_entropy(seed),
            &self.derivation_path(index),
            self.curve(),
        )
    }

    /// Address of wallet `index` on this chain
    pub fn derive_address(self, seed: &Seed, index: u32) -> WalletResult<String> {
        match self {
            Chain::Ethereum => {
                let key = self.derive_key(seed, index)?;
                EvmAddress::derive(&key.private_key[..])
            }
            Chain::Solana => SolanaAddress::derive(seed, index),
        }
    }

    pub fn is_valid_address(self, address: &str) -> bool {
        match self {
            Chain::Ethereum => EvmAddress::is_valid(address),
            Chain::Solana => SolanaAddress::is_valid(address),
        }
    }

    pub fn curve(self) -> CurveType {
        match self {
            Chain::Ethereum => CurveType::Secp256k1,
            Chain::Solana => CurveType::Ed25519,
        }
    }

    pub fn derivation_path(self, index: u32) -> String {
        match self {
            Chain::Ethereum => DerivationPaths::evm(index),
            Chain::Solana => DerivationPaths::solana(index),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Solana => "SOL",
        }
    }

    pub fn decimals(self) -> u8 {
        match self {
            Chain::Ethereum => 18,
            Chain::Solana => 9,
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Ethereum => write!(f, "ethereum"),
            Chain::Solana => write!(f, "solana"),
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

// Shared config for the EVM chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvmChainConfig {
    pub chain_id: u64,
    pub rpc_url: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Give up waiting for a receipt after this long
    pub receipt_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for EvmChainConfig {
    fn default() -> Self {
        Self::ethereum()
    }
}

// Presets for the common networks
impl EvmChainConfig {
    pub fn ethereum() -> Self {
        Self {
            chain_id: 1,
            rpc_url: "https://eth.llamarpc.com".to_string(),
            name: "Ethereum Mainnet".to_string(),
            symbol: "ETH".to_string(),
            decimals: 18,
            receipt_timeout_secs: 180,
            poll_interval_ms: 2_000,
        }
    }

    pub fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            name: "Ethereum Sepolia".to_string(),
            ..Self::ethereum()
        }
    }

    pub fn from_json(json: &str) -> WalletResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WalletError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> WalletResult<()> {
        if self.chain_id == 0 {
            return Err(WalletError::Config("chain_id must be non-zero".to_string()));
        }
        if self.rpc_url.trim().is_empty() {
            return Err(WalletError::Config("rpc_url is empty".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(WalletError::Config(
                "poll_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolanaChainConfig {
    pub rpc_url: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for SolanaChainConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl SolanaChainConfig {
    pub fn mainnet() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            name: "Solana Mainnet".to_string(),
            symbol: "SOL".to_string(),
            decimals: 9,
        }
    }

    pub fn devnet() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            name: "Solana Devnet".to_string(),
            ..Self::mainnet()
        }
    }

    pub fn from_json(json: &str) -> WalletResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WalletError::Config(e.to_string()))?;
        if config.rpc_url.trim().is_empty() {
            return Err(WalletError::Config("rpc_url is empty".to_string()));
        }
        Ok(config)
    }
}
