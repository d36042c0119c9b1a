#![doc(test(attr(deny(warnings))))]

//! Tally records per-tenant income entries under a daily subscription quota
//! and derives dashboard metrics from each tenant's append-only ledger.
//!
//! The heavy lifting lives in the workspace crates; this crate wires them
//! together behind [`dashboard::Dashboard`] and ships the `tally_cli` shell.

pub mod cli;
pub mod clock;
pub mod dashboard;
pub mod errors;
pub mod utils;

pub use dashboard::{Dashboard, DashboardView};
pub use errors::{CliError, Result, TallyError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tally tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
