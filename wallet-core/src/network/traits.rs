// wallet-core/src/network/traits.rs

// Network collaborator traits
//
// The core never talks to a node directly. Everything remote goes through
// these traits so the transfer engine can be driven by a real JSON-RPC
// provider or by an in-memory mock in tests.

use crate::error::WalletResult;
use crate::network::models::{FeeEstimate, TransactionReceipt};
use alloy::primitives::{Address, U256};
use async_trait::async_trait;

// =============================================================================
// BALANCE
// =============================================================================

/// Anything that can report a native balance in base units
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    async fn get_balance(&self, address: &str) -> WalletResult<U256>;
}

// =============================================================================
// ACCOUNT CHAIN PROVIDER
// =============================================================================

/// NetworkProvider - what the transfer engine needs from an EVM node
///
/// # Error contract
/// Failures are `WalletError::Provider` carrying one of the codes in
/// [`crate::error::codes`]; the engine classifies them. Retries and backoff
/// are the provider's business.
#[async_trait]
pub trait NetworkProvider: BalanceOracle {
    fn chain_id(&self) -> u64;

    /// Pending nonce for `address`
    async fn get_transaction_count(&self, address: &str) -> WalletResult<u64>;

    /// Gas limit for a plain value transfer
    async fn estimate_gas(&self, from: Address, to: Address, value: U256) -> WalletResult<u64>;

    /// Current legacy gas price in wei
    async fn gas_price(&self) -> WalletResult<u128>;

    /// `estimate_gas` + `gas_price`
    async fn estimate_fee(&self, from: Address, to: Address, value: U256) -> WalletResult<FeeEstimate> {
        let gas_units = self.estimate_gas(from, to, value).await?;
        let unit_price = self.gas_price().await?;
        Ok(FeeEstimate {
            gas_units,
            unit_price,
        })
    }

    /// Submit signed raw bytes, return the transaction hash
    async fn broadcast_transaction(&self, raw_tx: &[u8]) -> WalletResult<String>;

    /// Block until the transaction is mined (or the provider gives up)
    async fn wait_for_receipt(&self, tx_hash: &str) -> WalletResult<TransactionReceipt>;
}
