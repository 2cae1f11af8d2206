#![doc(test(attr(deny(warnings))))]

//! Kakeibo Core holds the state of a household ledger: entries bucketed by
//! year-month, the user's display settings, and the category lists derived
//! from them. A small shell (`kakeibo_cli`) drives it from the terminal.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use crate::core::{Action, ActionOutcome, Kakeibo, KakeiboError, Mutation};
pub use crate::domain::{LedgerEntry, Settings, YearMonth};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Kakeibo Core tracing initialized.");
    });
}
