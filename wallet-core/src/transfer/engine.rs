// wallet-core/src/transfer/engine.rs
//
// Transfer Engine - one native transfer at a time on the account chain
//
// submit():
//   1. validate draft                      (InvalidRequest, state untouched)
//   2. Idle|Confirmed|Failed → Signing     (AlreadyInProgress otherwise)
//   3. seed → signer for the wallet index  (fresh, dropped after signing)
//   4. fresh balance + fresh fee estimate
//   5. balance >= amount + fee             (InsufficientFunds, no broadcast)
//   6. sign, broadcast → Pending{tx_hash}
//   7. receipt → Confirmed | Failed(Reverted), balance refreshed either way
//   8. on success the draft is cleared
//
// Once the raw transaction is handed to the provider, every failure (receipt
// error, dropped future) ends in Failed(Unconfirmed) with the draft cleared.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy::primitives::{keccak256, Address, U256};
use tokio::sync::{watch, Mutex};

use crate::chains::evm::{derive_account, EvmAddress, NativeTransfer};
use crate::chains::EvmChainConfig;
use crate::crypto::WalletMnemonic;
use crate::error::TransferError;
use crate::network::{Balance, FeeEstimate, NetworkProvider};
use crate::transfer::request::{TransferDraft, TransferRequest};
use crate::transfer::state::TransferState;
use crate::wallet::WalletEntry;

/// Inputs a fee quote was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QuoteInputs {
    from: Address,
    wallet_index: u32,
    to: Address,
    amount: U256,
}

/// Advisory fee for the current draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeQuote {
    pub gas_units: u64,
    pub unit_price: u128,
    /// `gas_units * unit_price`, base units
    pub fee: U256,
    inputs: QuoteInputs,
}

impl FeeQuote {
    fn new(estimate: FeeEstimate, inputs: QuoteInputs) -> Self {
        Self {
            gas_units: estimate.gas_units,
            unit_price: estimate.unit_price,
            fee: estimate.fee(),
            inputs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    Ready(FeeQuote),
    /// Draft is missing or invalid; nothing was asked of the network
    Incomplete,
    /// Inputs changed (or a newer quote started) while this one was in flight
    Superseded,
}

/// Claim on the state cell for one submit.
///
/// Dropping it while the state is still in flight releases the claim: back to
/// `Idle` if nothing was broadcast, `Failed(Unconfirmed)` otherwise.
struct InFlight<'a, P: NetworkProvider> {
    engine: &'a TransferEngine<P>,
    broadcast_hash: Option<String>,
}

impl<P: NetworkProvider> Drop for InFlight<'_, P> {
    fn drop(&mut self) {
        let broadcast_hash = self.broadcast_hash.take();
        let mut released = None;
        self.engine.state.send_if_modified(|state| {
            if !state.is_in_flight() {
                return false;
            }
            let next = match broadcast_hash.or_else(|| state.tx_hash().map(str::to_string)) {
                Some(tx_hash) => TransferState::Failed(TransferError::Unconfirmed { tx_hash }),
                None => TransferState::Idle,
            };
            released = Some(next.clone());
            *state = next;
            true
        });

        match released {
            Some(TransferState::Failed(reason)) => {
                tracing::warn!(%reason, "submit abandoned after broadcast");
                match self.engine.draft.try_lock() {
                    Ok(mut draft) => draft.clear(),
                    Err(_) => tracing::warn!("draft busy, not cleared"),
                }
                self.engine.generation.fetch_add(1, Ordering::SeqCst);
            }
            Some(_) => tracing::info!("submit abandoned before broadcast"),
            None => {}
        }
    }
}

pub struct TransferEngine<P: NetworkProvider> {
    provider: Arc<P>,
    symbol: String,
    decimals: u8,
    state: watch::Sender<TransferState>,
    draft: Mutex<TransferDraft>,
    quote: Mutex<Option<FeeQuote>>,
    balance: Mutex<Option<Balance>>,
    last_tx_hash: Mutex<Option<String>>,
    /// Bumped on every draft edit and every quote request
    generation: AtomicU64,
}

impl<P: NetworkProvider> std::fmt::Debug for TransferEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferEngine")
            .field("chain_id", &self.provider.chain_id())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<P: NetworkProvider> TransferEngine<P> {
    pub fn new(provider: Arc<P>, config: &EvmChainConfig) -> Self {
        let (state, _) = watch::channel(TransferState::Idle);
        Self {
            provider,
            symbol: config.symbol.clone(),
            decimals: config.decimals,
            state,
            draft: Mutex::new(TransferDraft::default()),
            quote: Mutex::new(None),
            balance: Mutex::new(None),
            last_tx_hash: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // DRAFT
    // =========================================================================

    pub async fn set_recipient(&self, recipient: impl Into<String>) {
        self.draft.lock().await.recipient = recipient.into();
        self.invalidate_quote().await;
    }

    pub async fn set_amount(&self, amount: impl Into<String>) {
        self.draft.lock().await.amount = amount.into();
        self.invalidate_quote().await;
    }

    pub async fn draft(&self) -> TransferDraft {
        self.draft.lock().await.clone()
    }

    async fn clear_draft(&self) {
        self.draft.lock().await.clear();
        self.invalidate_quote().await;
    }

    async fn invalidate_quote(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.quote.lock().await = None;
    }

    async fn current_inputs(&self, wallet: &WalletEntry) -> Option<QuoteInputs> {
        let request = self.draft.lock().await.validate(self.decimals).ok()?;
        let from = EvmAddress::parse(&wallet.address).ok()?;
        Some(QuoteInputs {
            from,
            wallet_index: wallet.index,
            to: request.to,
            amount: request.amount,
        })
    }

    // =========================================================================
    // FEE QUOTE
    // =========================================================================

    /// Estimate the fee for the current draft from `wallet`.
    ///
    /// The result is only stored if nothing changed while the estimate was
    /// in flight. Does not touch the transfer state.
    pub async fn quote_fee(&self, wallet: &WalletEntry) -> Result<QuoteOutcome, TransferError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(inputs) = self.current_inputs(wallet).await else {
            *self.quote.lock().await = None;
            return Ok(QuoteOutcome::Incomplete);
        };

        let estimate = self
            .provider
            .estimate_fee(inputs.from, inputs.to, inputs.amount)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "fee estimate failed");
                TransferError::from(e)
            })?;

        let mut quote_slot = self.quote.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "fee quote superseded");
            return Ok(QuoteOutcome::Superseded);
        }

        let quote = FeeQuote::new(estimate, inputs);
        tracing::debug!(gas_units = quote.gas_units, fee = %quote.fee, "fee quote ready");
        *quote_slot = Some(quote.clone());
        Ok(QuoteOutcome::Ready(quote))
    }

    /// Last quote, if it still matches the draft and `wallet`
    pub async fn current_quote(&self, wallet: &WalletEntry) -> Option<FeeQuote> {
        let inputs = self.current_inputs(wallet).await?;
        self.quote
            .lock()
            .await
            .as_ref()
            .filter(|q| q.inputs == inputs)
            .cloned()
    }

    // =========================================================================
    // SUBMIT
    // =========================================================================

    /// Send the drafted transfer from `wallet`. Returns the transaction hash
    /// once the receipt reports success.
    ///
    /// Safe to drop before broadcast; the engine returns to `Idle`.
    pub async fn submit(
        &self,
        mnemonic: &WalletMnemonic,
        wallet: &WalletEntry,
    ) -> Result<String, TransferError> {
        let request = self.draft.lock().await.validate(self.decimals)?;

        let started = self.state.send_if_modified(|state| {
            if state.is_in_flight() {
                return false;
            }
            *state = TransferState::Signing;
            true
        });
        if !started {
            tracing::warn!(index = wallet.index, "submit refused, transfer in progress");
            return Err(TransferError::AlreadyInProgress);
        }

        tracing::info!(index = wallet.index, to = %request.to, amount = %request.amount, "transfer started");

        let mut claim = InFlight {
            engine: self,
            broadcast_hash: None,
        };
        let outcome = self.execute(&mut claim, mnemonic, wallet, request).await;
        match outcome {
            Ok(tx_hash) => Ok(tx_hash),
            Err(reason) => {
                tracing::warn!(%reason, retry_safe = reason.is_retry_safe(), "transfer failed");
                self.state.send_replace(TransferState::Failed(reason.clone()));
                Err(reason)
            }
        }
    }

    async fn execute(
        &self,
        claim: &mut InFlight<'_, P>,
        mnemonic: &WalletMnemonic,
        wallet: &WalletEntry,
        request: TransferRequest,
    ) -> Result<String, TransferError> {
        let (from_str, signer) = {
            let seed = mnemonic.to_seed(None)?;
            derive_account(&seed, wallet.index, self.provider.chain_id())?
        };

        if !EvmAddress::equals(&from_str, &wallet.address) {
            return Err(TransferError::Derivation(format!(
                "Derived address for index {} does not match the wallet entry",
                wallet.index
            )));
        }
        let from = signer.address();

        let balance = self.refresh_balance(&from_str).await?;
        let estimate = self
            .provider
            .estimate_fee(from, request.to, request.amount)
            .await?;

        let fee = estimate.fee();
        let required = request
            .amount
            .checked_add(fee)
            .ok_or(TransferError::InsufficientFunds)?;
        if balance.raw < required {
            tracing::info!(balance = %balance.raw, %required, "insufficient funds");
            return Err(TransferError::InsufficientFunds);
        }

        let nonce = self.provider.get_transaction_count(&from_str).await?;
        let raw_tx = signer
            .sign_transfer(&NativeTransfer {
                to: request.to,
                value: request.amount,
                nonce,
                gas_limit: estimate.gas_units,
                gas_price: estimate.unit_price,
            })
            .await?;
        drop(signer);

        claim.broadcast_hash = Some(keccak256(&raw_tx).to_string());
        let tx_hash = self.provider.broadcast_transaction(&raw_tx).await?;
        claim.broadcast_hash = Some(tx_hash.clone());
        *self.last_tx_hash.lock().await = Some(tx_hash.clone());
        self.state.send_replace(TransferState::Pending {
            tx_hash: tx_hash.clone(),
        });
        tracing::info!(%tx_hash, nonce, "transfer pending");

        let receipt = match self.provider.wait_for_receipt(&tx_hash).await {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(%tx_hash, error = %e, "no receipt after broadcast");
                self.clear_draft().await;
                return Err(TransferError::Unconfirmed { tx_hash });
            }
        };

        // Gas was spent either way
        if let Err(e) = self.refresh_balance(&from_str).await {
            tracing::warn!(error = %e, "balance refresh after receipt failed");
        }

        if !receipt.success() {
            return Err(TransferError::Reverted { tx_hash });
        }

        self.clear_draft().await;
        self.state.send_replace(TransferState::Confirmed {
            tx_hash: tx_hash.clone(),
        });
        tracing::info!(%tx_hash, block = ?receipt.block_number, "transfer confirmed");
        Ok(tx_hash)
    }

    // =========================================================================
    // BALANCE & OBSERVERS
    // =========================================================================

    /// Fetch and remember the balance of `address`
    pub async fn refresh_balance(&self, address: &str) -> Result<Balance, TransferError> {
        let raw = self.provider.get_balance(address).await?;
        let balance = Balance::new(raw, self.decimals, self.symbol.clone());
        *self.balance.lock().await = Some(balance.clone());
        Ok(balance)
    }

    pub async fn balance(&self) -> Option<Balance> {
        self.balance.lock().await.clone()
    }

    pub async fn last_tx_hash(&self) -> Option<String> {
        self.last_tx_hash.lock().await.clone()
    }

    pub fn state(&self) -> TransferState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransferState> {
        self.state.subscribe()
    }

    /// Confirmed/Failed → Idle. In-flight states are left alone.
    pub fn acknowledge(&self) {
        self.state.send_if_modified(|state| {
            if state.is_terminal() {
                *state = TransferState::Idle;
                true
            } else {
                false
            }
        });
    }
}
