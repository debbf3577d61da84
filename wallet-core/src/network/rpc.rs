// wallet-core/src/network/rpc.rs
//
// JSON-RPC 2.0 providers over HTTP (reqwest)
//
//   EvmRpcProvider    → NetworkProvider + BalanceOracle (eth_*)
//   SolanaRpcProvider → BalanceOracle (getBalance)
//
// Every failure becomes a coded ProviderError:
//   transport / HTTP status       → NETWORK_ERROR
//   node error "insufficient funds" → INSUFFICIENT_FUNDS
//   any other node error          → SERVER_ERROR
//   unparseable response          → BAD_DATA
//   receipt wait elapsed          → TIMEOUT

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::chains::{EvmChainConfig, SolanaChainConfig};
use crate::error::{codes, ProviderError, WalletError, WalletResult};
use crate::network::models::{TransactionReceipt, TransactionStatus};
use crate::network::traits::{BalanceOracle, NetworkProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn provider_error(code: &str, message: impl Into<String>) -> WalletError {
    WalletError::Provider(ProviderError::new(code, message))
}

// =============================================================================
// PURE HELPERS
// =============================================================================

/// JSON-RPC request body
pub fn build_request(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

/// Map a node-side error object to a provider error code
pub fn classify_rpc_error(message: &str) -> &'static str {
    if message.to_ascii_lowercase().contains("insufficient funds") {
        codes::INSUFFICIENT_FUNDS
    } else {
        codes::SERVER_ERROR
    }
}

/// Pull `result` out of a response body, turning `error` into a ProviderError
pub fn extract_result(mut body: Value) -> WalletResult<Value> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown RPC error");
        let rpc_code = error.get("code").and_then(Value::as_i64).unwrap_or(-1);
        return Err(provider_error(
            classify_rpc_error(message),
            format!("RPC error {}: {}", rpc_code, message),
        ));
    }

    match body.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => Err(provider_error(
            codes::BAD_DATA,
            "Missing result field in RPC response",
        )),
    }
}

fn strip_hex(quantity: &str) -> WalletResult<&str> {
    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .ok_or_else(|| {
            provider_error(codes::BAD_DATA, format!("Not a hex quantity: {}", quantity))
        })?;
    if digits.is_empty() {
        return Err(provider_error(codes::BAD_DATA, "Empty hex quantity"));
    }
    Ok(digits)
}

/// "0x1bc16d674ec80000" → U256
pub fn parse_hex_u256(quantity: &str) -> WalletResult<U256> {
    let digits = strip_hex(quantity)?;
    U256::from_str_radix(digits, 16).map_err(|e| {
        provider_error(codes::BAD_DATA, format!("Invalid quantity {}: {}", quantity, e))
    })
}

/// "0x5208" → 21000
pub fn parse_hex_u64(quantity: &str) -> WalletResult<u64> {
    let digits = strip_hex(quantity)?;
    u64::from_str_radix(digits, 16).map_err(|e| {
        provider_error(codes::BAD_DATA, format!("Invalid quantity {}: {}", quantity, e))
    })
}

fn as_quantity_str(value: &Value) -> WalletResult<&str> {
    value
        .as_str()
        .ok_or_else(|| provider_error(codes::BAD_DATA, format!("Expected hex string, got {}", value)))
}

/// `eth_getTransactionReceipt` result → receipt; `null` means not mined yet
pub fn parse_receipt(value: &Value) -> WalletResult<Option<TransactionReceipt>> {
    if value.is_null() {
        return Ok(None);
    }

    let tx_hash = value
        .get("transactionHash")
        .and_then(Value::as_str)
        .ok_or_else(|| provider_error(codes::BAD_DATA, "Receipt without transactionHash"))?
        .to_string();

    let status = value
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| provider_error(codes::BAD_DATA, "Receipt without status"))?;
    let status = if parse_hex_u64(status)? == 1 {
        TransactionStatus::Confirmed
    } else {
        TransactionStatus::Failed
    };

    let optional_u64 = |key: &str| -> WalletResult<Option<u64>> {
        match value.get(key).and_then(Value::as_str) {
            Some(s) => parse_hex_u64(s).map(Some),
            None => Ok(None),
        }
    };

    Ok(Some(TransactionReceipt {
        tx_hash,
        status,
        block_number: optional_u64("blockNumber")?,
        gas_used: optional_u64("gasUsed")?,
    }))
}

// =============================================================================
// CLIENT
// =============================================================================

/// Minimal JSON-RPC 2.0 client over one HTTP endpoint
#[derive(Debug)]
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>) -> WalletResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| WalletError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn call(&self, method: &str, params: Value) -> WalletResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = build_request(id, method, params);

        tracing::debug!(method, id, url = %self.url, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(method, error = %e, "rpc transport failure");
                provider_error(codes::NETWORK_ERROR, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(method, %status, "rpc http error");
            return Err(provider_error(
                codes::NETWORK_ERROR,
                format!("RPC request failed with status {}", status),
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            provider_error(codes::BAD_DATA, format!("Failed to parse JSON response: {}", e))
        })?;

        extract_result(body).map_err(|e| {
            tracing::warn!(method, error = %e, "rpc call failed");
            e
        })
    }
}

// =============================================================================
// EVM PROVIDER
// =============================================================================

pub struct EvmRpcProvider {
    client: JsonRpcClient,
    config: EvmChainConfig,
}

impl EvmRpcProvider {
    pub fn new(config: EvmChainConfig) -> WalletResult<Self> {
        let client = JsonRpcClient::new(config.rpc_url.clone())?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EvmChainConfig {
        &self.config
    }

    pub async fn get_transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> WalletResult<Option<TransactionReceipt>> {
        let result = self
            .client
            .call("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        parse_receipt(&result)
    }
}

#[async_trait]
impl BalanceOracle for EvmRpcProvider {
    async fn get_balance(&self, address: &str) -> WalletResult<U256> {
        let result = self
            .client
            .call("eth_getBalance", json!([address, "latest"]))
            .await?;
        parse_hex_u256(as_quantity_str(&result)?)
    }
}

#[async_trait]
impl NetworkProvider for EvmRpcProvider {
    fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    async fn get_transaction_count(&self, address: &str) -> WalletResult<u64> {
        let result = self
            .client
            .call("eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        parse_hex_u64(as_quantity_str(&result)?)
    }

    async fn estimate_gas(&self, from: Address, to: Address, value: U256) -> WalletResult<u64> {
        let result = self
            .client
            .call(
                "eth_estimateGas",
                json!([{
                    "from": from.to_string(),
                    "to": to.to_string(),
                    "value": format!("0x{:x}", value),
                }]),
            )
            .await?;
        parse_hex_u64(as_quantity_str(&result)?)
    }

    async fn gas_price(&self) -> WalletResult<u128> {
        let result = self.client.call("eth_gasPrice", json!([])).await?;
        let price = parse_hex_u256(as_quantity_str(&result)?)?;
        u128::try_from(price)
            .map_err(|_| provider_error(codes::BAD_DATA, format!("Gas price out of range: {}", price)))
    }

    async fn broadcast_transaction(&self, raw_tx: &[u8]) -> WalletResult<String> {
        let raw_hex = format!("0x{}", hex::encode(raw_tx));
        let result = self
            .client
            .call("eth_sendRawTransaction", json!([raw_hex]))
            .await?;
        let tx_hash = result
            .as_str()
            .ok_or_else(|| provider_error(codes::BAD_DATA, "Transaction hash is not a string"))?
            .to_string();
        tracing::info!(%tx_hash, chain_id = self.config.chain_id, "transaction broadcast");
        Ok(tx_hash)
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> WalletResult<TransactionReceipt> {
        let poll = Duration::from_millis(self.config.poll_interval_ms);
        let timeout = Duration::from_secs(self.config.receipt_timeout_secs);

        let wait = async {
            loop {
                if let Some(receipt) = self.get_transaction_receipt(tx_hash).await? {
                    return Ok::<_, WalletError>(receipt);
                }
                tokio::time::sleep(poll).await;
            }
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(receipt) => receipt,
            Err(_) => {
                tracing::warn!(%tx_hash, ?timeout, "gave up waiting for receipt");
                Err(provider_error(
                    codes::TIMEOUT,
                    format!("No receipt for {} after {:?}", tx_hash, timeout),
                ))
            }
        }
    }
}

// =============================================================================
// SOLANA PROVIDER
// =============================================================================

pub struct SolanaRpcProvider {
    client: JsonRpcClient,
    config: SolanaChainConfig,
}

impl SolanaRpcProvider {
    pub fn new(config: SolanaChainConfig) -> WalletResult<Self> {
        let client = JsonRpcClient::new(config.rpc_url.clone())?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SolanaChainConfig {
        &self.config
    }
}

/// `{"context": {...}, "value": <lamports>}` → lamports
pub fn parse_solana_balance(result: &Value) -> WalletResult<U256> {
    result
        .get("value")
        .and_then(Value::as_u64)
        .map(U256::from)
        .ok_or_else(|| provider_error(codes::BAD_DATA, "getBalance result without value"))
}

#[async_trait]
impl BalanceOracle for SolanaRpcProvider {
    async fn get_balance(&self, address: &str) -> WalletResult<U256> {
        let result = self.client.call("getBalance", json!([address])).await?;
        parse_solana_balance(&result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
