#![doc(test(attr(deny(warnings))))]

//! Sign-up wizard core: a four-step form state machine with per-step field
//! validation, snapshot persistence through a key-value store, and a review
//! summary before submission.

pub mod cli;
pub mod config;
pub mod errors;
pub mod storage;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Signup wizard tracing initialized.");
    });
}
