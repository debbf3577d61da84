// wallet-core/src/api/mod.rs

//! Entry points for the host application.

pub mod session;

pub use session::WalletSession;

use crate::error::WalletResult;
use tracing_subscriber::EnvFilter;

// Core Initialization
//
// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
// Calling it again, or after the host installed its own subscriber, is a no-op.
pub fn init_core() -> WalletResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
    {
        tracing::debug!("wallet core logging initialised");
    }
    Ok(())
}
