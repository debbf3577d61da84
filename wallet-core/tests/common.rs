//! Shared fixtures for the wallet-core integration tests
//!
//! - `MockProvider`: scripted in-memory `NetworkProvider`
//! - phrase/recipient constants and an engine config in whole base units

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokio::sync::Notify;

use wallet_core::chains::EvmChainConfig;
use wallet_core::error::{ProviderError, WalletError, WalletResult};
use wallet_core::network::{
    BalanceOracle, NetworkProvider, TransactionReceipt, TransactionStatus,
};
use wallet_core::{Chain, WalletEntry, WalletMnemonic, WalletRegistry};

pub const TEST_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const CHAIN_ID: u64 = 11155111;

/// Sepolia with 0 decimals so amounts in tests are plain wei
pub fn engine_config() -> EvmChainConfig {
    EvmChainConfig {
        decimals: 0,
        ..EvmChainConfig::sepolia()
    }
}

pub fn mnemonic() -> WalletMnemonic {
    WalletMnemonic::from_phrase(TEST_MNEMONIC).expect("valid test phrase")
}

/// First Ethereum wallet of the test phrase
pub fn first_wallet() -> WalletEntry {
    let m = mnemonic();
    let mut registry = WalletRegistry::new(Chain::Ethereum);
    registry.add(Some(&m)).expect("derive wallet").clone()
}

fn provider_err(code: &str) -> WalletError {
    WalletError::Provider(ProviderError::new(code, format!("mock {}", code)))
}

pub struct MockProvider {
    pub balance: Mutex<U256>,
    pub gas_units: u64,
    pub unit_price: u128,
    pub receipt_success: bool,

    pub balance_error: Option<&'static str>,
    pub estimate_error: Option<&'static str>,
    pub broadcast_error: Option<&'static str>,
    pub receipt_error: Option<&'static str>,

    /// When set, `wait_for_receipt` blocks until notified
    pub receipt_gate: Option<Arc<Notify>>,
    /// When set, `estimate_gas` signals `estimate_started` then blocks until notified
    pub estimate_gate: Option<Arc<Notify>>,
    pub estimate_started: Arc<Notify>,

    pub balance_calls: AtomicUsize,
    pub estimate_calls: AtomicUsize,
    pub broadcasts: AtomicUsize,
    pub last_raw_tx: Mutex<Option<Vec<u8>>>,
}

impl MockProvider {
    pub fn new(balance: u64, gas_units: u64, unit_price: u128) -> Self {
        Self {
            balance: Mutex::new(U256::from(balance)),
            gas_units,
            unit_price,
            receipt_success: true,
            balance_error: None,
            estimate_error: None,
            broadcast_error: None,
            receipt_error: None,
            receipt_gate: None,
            estimate_gate: None,
            estimate_started: Arc::new(Notify::new()),
            balance_calls: AtomicUsize::new(0),
            estimate_calls: AtomicUsize::new(0),
            broadcasts: AtomicUsize::new(0),
            last_raw_tx: Mutex::new(None),
        }
    }

    pub fn broadcast_count(&self) -> usize {
        self.broadcasts.load(Ordering::SeqCst)
    }

    pub fn balance_call_count(&self) -> usize {
        self.balance_calls.load(Ordering::SeqCst)
    }

    pub fn estimate_call_count(&self) -> usize {
        self.estimate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceOracle for MockProvider {
    async fn get_balance(&self, _address: &str) -> WalletResult<U256> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.balance_error {
            return Err(provider_err(code));
        }
        Ok(*self.balance.lock().unwrap())
    }
}

#[async_trait]
impl NetworkProvider for MockProvider {
    fn chain_id(&self) -> u64 {
        CHAIN_ID
    }

    async fn get_transaction_count(&self, _address: &str) -> WalletResult<u64> {
        Ok(self.broadcasts.load(Ordering::SeqCst) as u64)
    }

    async fn estimate_gas(&self, _from: Address, _to: Address, _value: U256) -> WalletResult<u64> {
        self.estimate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.estimate_gate {
            self.estimate_started.notify_one();
            gate.notified().await;
        }
        if let Some(code) = self.estimate_error {
            return Err(provider_err(code));
        }
        Ok(self.gas_units)
    }

    async fn gas_price(&self) -> WalletResult<u128> {
        Ok(self.unit_price)
    }

    async fn broadcast_transaction(&self, raw_tx: &[u8]) -> WalletResult<String> {
        if let Some(code) = self.broadcast_error {
            return Err(provider_err(code));
        }
        let n = self.broadcasts.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last_raw_tx.lock().unwrap() = Some(raw_tx.to_vec());
        Ok(format!("0x{:064x}", n))
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> WalletResult<TransactionReceipt> {
        if let Some(gate) = &self.receipt_gate {
            gate.notified().await;
        }
        if let Some(code) = self.receipt_error {
            return Err(provider_err(code));
        }
        Ok(TransactionReceipt {
            tx_hash: tx_hash.to_string(),
            status: if self.receipt_success {
                TransactionStatus::Confirmed
            } else {
                TransactionStatus::Failed
            },
            block_number: Some(1),
            gas_used: Some(self.gas_units),
        })
    }
}
