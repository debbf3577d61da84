// wallet-core/src/api/session.rs
//
// Wallet Session - the phrase plus one registry per chain
//
// The phrase is the only secret. Seeds and keys are derived from it on
// demand and dropped right after use.

use crate::chains::Chain;
use crate::crypto::{WalletMnemonic, WordCount};
use crate::error::{WalletError, WalletResult};
use crate::network::{Balance, BalanceOracle};
use crate::wallet::{WalletEntry, WalletRegistry};

#[derive(Debug)]
pub struct WalletSession {
    mnemonic: Option<WalletMnemonic>,
    ethereum: WalletRegistry,
    solana: WalletRegistry,
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletSession {
    pub fn new() -> Self {
        Self {
            mnemonic: None,
            ethereum: WalletRegistry::new(Chain::Ethereum),
            solana: WalletRegistry::new(Chain::Solana),
        }
    }

    // =========================================================================
    // PHRASE
    // =========================================================================

    /// Fresh 12-word phrase. Existing wallets are discarded.
    pub fn generate_mnemonic(&mut self) -> WalletResult<()> {
        let mnemonic = WalletMnemonic::generate(WordCount::Twelve)?;
        self.replace_mnemonic(mnemonic);
        Ok(())
    }

    /// Import a phrase. On error the session is left as it was.
    pub fn restore_mnemonic(&mut self, phrase: &str) -> WalletResult<()> {
        let mnemonic = WalletMnemonic::from_phrase(phrase)?;
        self.replace_mnemonic(mnemonic);
        Ok(())
    }

    fn replace_mnemonic(&mut self, mnemonic: WalletMnemonic) {
        // Addresses in the registries belong to the old phrase
        self.ethereum.reset();
        self.solana.reset();
        self.mnemonic = Some(mnemonic);
        tracing::info!("recovery phrase replaced, wallets reset");
    }

    pub fn has_mnemonic(&self) -> bool {
        self.mnemonic.is_some()
    }

    pub fn mnemonic(&self) -> Option<&WalletMnemonic> {
        self.mnemonic.as_ref()
    }

    /// Words for display/backup
    pub fn mnemonic_words(&self) -> Option<Vec<&str>> {
        self.mnemonic.as_ref().map(WalletMnemonic::words)
    }

    // =========================================================================
    // WALLETS
    // =========================================================================

    pub fn registry(&self, chain: Chain) -> &WalletRegistry {
        match chain {
            Chain::Ethereum => &self.ethereum,
            Chain::Solana => &self.solana,
        }
    }

    fn registry_mut(&mut self, chain: Chain) -> &mut WalletRegistry {
        match chain {
            Chain::Ethereum => &mut self.ethereum,
            Chain::Solana => &mut self.solana,
        }
    }

    pub fn add_wallet(&mut self, chain: Chain) -> WalletResult<WalletEntry> {
        let mnemonic = self.mnemonic.as_ref();
        let registry = match chain {
            Chain::Ethereum => &mut self.ethereum,
            Chain::Solana => &mut self.solana,
        };
        registry.add(mnemonic).cloned()
    }

    pub fn select_wallet(&mut self, chain: Chain, position: usize) {
        self.registry_mut(chain).select(position);
    }

    pub fn delete_wallet(&mut self, chain: Chain, position: usize) -> Option<WalletEntry> {
        self.registry_mut(chain).delete(position)
    }

    pub fn selected_wallet(&self, chain: Chain) -> Option<&WalletEntry> {
        self.registry(chain).selected_entry()
    }

    /// Phrase + selected Ethereum wallet, the inputs of a transfer
    pub fn selected_account(&self) -> WalletResult<(&WalletMnemonic, &WalletEntry)> {
        let mnemonic = self.mnemonic.as_ref().ok_or(WalletError::NoMnemonic)?;
        let entry = self
            .ethereum
            .selected_entry()
            .ok_or_else(|| WalletError::Validation("No Ethereum wallet selected".to_string()))?;
        Ok((mnemonic, entry))
    }

    /// Balance of the selected wallet on `chain`; `None` when nothing is selected
    pub async fn refresh_balance(
        &self,
        chain: Chain,
        oracle: &dyn BalanceOracle,
    ) -> WalletResult<Option<Balance>> {
        let Some(entry) = self.selected_wallet(chain) else {
            return Ok(None);
        };
        let raw = oracle.get_balance(&entry.address).await?;
        let balance = Balance::new(raw, chain.decimals(), chain.symbol());
        tracing::debug!(%chain, address = %entry.address, balance = %balance.formatted, "balance refreshed");
        Ok(Some(balance))
    }

    /// Wipe the phrase and forget every wallet
    pub fn destroy(&mut self) {
        // WalletMnemonic zeroizes on drop
        self.mnemonic = None;
        self.ethereum.reset();
        self.solana.reset();
        tracing::info!("session destroyed");
    }
}
