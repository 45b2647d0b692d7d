//! Area Assessment wires the checklist form engine from `assessment-core`
//! to an interactive and scriptable terminal shell.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Area assessment tracing initialized.");
    });
}
