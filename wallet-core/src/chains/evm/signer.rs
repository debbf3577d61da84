// wallet-core/src/chains/evm/signer.rs
//
// EVM Signer Module - offline signing for native transfers
// EIP-155 (Replay Protection), EIP-2718 envelopes

use crate::chains::Chain;
use crate::crypto::Seed;
use crate::error::{CryptoError, WalletError, WalletResult};
use alloy::{
    eips::eip2718::Encodable2718,
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, U256},
    rpc::types::eth::TransactionRequest,
    signers::{local::LocalSigner, Signer},
};
use k256::ecdsa::SigningKey;

/// Everything needed to sign one native-asset transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTransfer {
    pub to: Address,
    pub value: U256,
    pub nonce: u64,
    pub gas_limit: u64,
    pub gas_price: u128,
}

/// EVM Signer
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: the inner `SigningKey` wipes itself when dropped
/// - **Replay Protection**: chain ID is mandatory (EIP-155)
/// - **No Debug Leak**: custom Debug impl never prints the key
/// - **Short-lived**: derived from the seed for one submission, then dropped
pub struct EvmSigner {
    signer: LocalSigner<SigningKey>,
    address: Address,
    chain_id: u64,
}

// Custom Debug - NEVER print the private key
impl std::fmt::Debug for EvmSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmSigner")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl Drop for EvmSigner {
    fn drop(&mut self) {
        tracing::trace!(address = %self.address, "evm signer dropped");
    }
}

impl EvmSigner {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Build from a raw 32-byte private key
    ///
    /// # Arguments
    /// * `priv_key` - Private key, 32 bytes
    /// * `chain_id` - Chain ID (1 = Ethereum, 11155111 = Sepolia, ...)
    pub fn new(priv_key: &[u8], chain_id: u64) -> WalletResult<Self> {
        let signing_key = SigningKey::from_slice(priv_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid private key (must be 32 bytes): {}",
                e
            )))
        })?;

        let signer = LocalSigner::from(signing_key).with_chain_id(Some(chain_id));
        let address = signer.address();

        Ok(Self {
            signer,
            address,
            chain_id,
        })
    }

    /// Derive the signer for wallet `index` (m/44'/60'/0'/0/index)
    pub fn from_seed(seed: &Seed, index: u32, chain_id: u64) -> WalletResult<Self> {
        let key = Chain::Ethereum.derive_key(seed, index)?;
        Self::new(&key.private_key[..], chain_id)
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }

    /// EIP-55 checksummed address
    #[inline]
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    #[inline]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    // =========================================================================
    // TRANSACTION SIGNING
    // =========================================================================

    /// Sign a legacy (EIP-155) native transfer and return the raw EIP-2718
    /// bytes, ready for `eth_sendRawTransaction`
    pub async fn sign_transfer(&self, transfer: &NativeTransfer) -> WalletResult<Vec<u8>> {
        let tx = TransactionRequest::default()
            .with_from(self.address)
            .with_to(transfer.to)
            .with_value(transfer.value)
            .with_nonce(transfer.nonce)
            .with_chain_id(self.chain_id)
            .with_gas_limit(transfer.gas_limit)
            .with_gas_price(transfer.gas_price);

        self.sign_transaction(tx).await
    }

    /// Sign an arbitrary request offline
    pub async fn sign_transaction(&self, tx: TransactionRequest) -> WalletResult<Vec<u8>> {
        let wallet = EthereumWallet::from(self.signer.clone());

        let envelope = tx
            .build(&wallet)
            .await
            .map_err(|e| WalletError::Crypto(CryptoError::SigningFailed(e.to_string())))?;

        Ok(envelope.encoded_2718())
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================
