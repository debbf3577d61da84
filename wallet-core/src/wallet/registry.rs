// wallet-core/src/wallet/registry.rs
//
// Wallet Registry - ordered derived addresses + selection for one chain
//
//   add()        → derive at next_index, append, next_index += 1
//   select(p)    → selected = p (ignored if out of range)
//   delete(p)    → remove, then fix up `selected`
//
// `selected` is a position in `entries`, not a derivation index.

use crate::chains::Chain;
use crate::crypto::{Seed, WalletMnemonic};
use crate::error::{WalletError, WalletResult};
use serde::Serialize;

/// One derived wallet. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletEntry {
    /// Derivation index (the last path level)
    pub index: u32,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct WalletRegistry {
    chain: Chain,
    entries: Vec<WalletEntry>,
    /// Position in `entries`; 0 doubles as "no selection" when empty
    selected: usize,
    next_index: u32,
}

impl WalletRegistry {
    pub fn new(chain: Chain) -> Self {
        Self {
            chain,
            entries: Vec::new(),
            selected: 0,
            next_index: 0,
        }
    }

    /// Derive the next wallet and append it.
    ///
    /// The first entry becomes selected; later adds leave the selection alone.
    /// Without a phrase nothing changes and `NoMnemonic` is returned.
    pub fn add(&mut self, mnemonic: Option<&WalletMnemonic>) -> WalletResult<&WalletEntry> {
        let mnemonic = mnemonic.ok_or(WalletError::NoMnemonic)?;
        let seed = mnemonic.to_seed(None)?;
        self.add_with_seed(&seed)
    }

    /// Same as [`add`](Self::add) with an already stretched seed
    pub fn add_with_seed(&mut self, seed: &Seed) -> WalletResult<&WalletEntry> {
        let index = self.next_index;
        let next = index.checked_add(1).ok_or_else(|| {
            WalletError::Validation(format!("{} derivation indices exhausted", self.chain))
        })?;

        // Derive before touching state so a failure leaves the registry as-is
        let address = self.chain.derive_address(seed, index)?;

        self.next_index = next;
        self.entries.push(WalletEntry { index, address });
        if self.entries.len() == 1 {
            self.selected = 0;
        }

        let position = self.entries.len() - 1;
        let entry = &self.entries[position];
        tracing::info!(chain = %self.chain, index, address = %entry.address, "wallet added");
        Ok(entry)
    }

    /// Select by position. Out of range is ignored.
    pub fn select(&mut self, position: usize) {
        if position < self.entries.len() {
            self.selected = position;
            tracing::debug!(chain = %self.chain, position, "wallet selected");
        }
    }

    /// Remove by position and return the entry. Out of range is ignored.
    ///
    /// Selection afterwards:
    /// - list empty → 0
    /// - deleted the selected entry → 0
    /// - deleted before the selected entry → selected - 1
    /// - otherwise unchanged
    pub fn delete(&mut self, position: usize) -> Option<WalletEntry> {
        if position >= self.entries.len() {
            return None;
        }

        let removed = self.entries.remove(position);

        if self.entries.is_empty() || position == self.selected {
            self.selected = 0;
        } else if position < self.selected {
            self.selected -= 1;
        }

        tracing::info!(
            chain = %self.chain,
            index = removed.index,
            selected = self.selected,
            "wallet deleted"
        );
        Some(removed)
    }

    /// Drop every entry and restart indices at 0 (used when the phrase changes)
    pub fn reset(&mut self) {
        self.entries.clear();
        self.selected = 0;
        self.next_index = 0;
    }

    /// Re-derive the address of any index, listed or not
    pub fn rederive(&self, seed: &Seed, index: u32) -> WalletResult<String> {
        self.chain.derive_address(seed, index)
    }

    pub fn selected_entry(&self) -> Option<&WalletEntry> {
        self.entries.get(self.selected)
    }

    /// `None` when the list is empty
    pub fn selected_position(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    #[inline]
    pub fn chain(&self) -> Chain {
        self.chain
    }

    #[inline]
    pub fn entries(&self) -> &[WalletEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index the next `add` will use
    #[inline]
    pub fn next_index(&self) -> u32 {
        self.next_index
    }
}

// =============================================================================
// TESTS
// =============================================================================
