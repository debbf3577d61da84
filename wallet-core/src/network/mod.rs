// wallet-core/src/network/mod.rs
//
// Network Module - provider traits, shared models, JSON-RPC implementations

pub mod models;
pub mod rpc;
pub mod traits;

pub use models::*;
pub use rpc::{EvmRpcProvider, JsonRpcClient, SolanaRpcProvider};
pub use traits::*;
