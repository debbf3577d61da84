// wallet-core/src/transfer/mod.rs

//! Native transfers on the account chain.
//!
//! [`TransferEngine`] drives one attempt at a time through [`TransferState`]
//! and folds every failure into a [`TransferError`](crate::error::TransferError).

pub mod engine;
pub mod request;
pub mod state;

pub use engine::{FeeQuote, QuoteOutcome, TransferEngine};
pub use request::{TransferDraft, TransferRequest};
pub use state::TransferState;
