//! Shared test scaffolding. `init_tracing` wires the engine's `tracing`
//! events (segment builds, rollover decisions, storage failures) into test
//! output — run with `RUST_LOG=debug cargo test -- --nocapture` to see them.

use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}
