//! Tracing subscriber initialisation.
//!
//! The embedding process calls [`init_tracing`] once at startup; repeated
//! calls (for instance from parallel test binaries) are absorbed by the
//! init guard instead of panicking.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: OnceCell<()> = OnceCell::new();

/// Initialises the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. With
/// `json_output` set, events are emitted as JSON lines for log shippers;
/// otherwise a compact human format is used.
pub fn init_tracing(json_output: bool) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        if json_output {
            fmt()
                .with_env_filter(filter)
                .json()
                .with_target(false)
                .init();
        } else {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .compact()
                .init();
        }
    });
}
