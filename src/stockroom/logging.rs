//! Diagnostic logging for the binaries.
//!
//! The library only emits `tracing` events. Each binary calls [`init`] once at
//! startup. Output goes to stderr so it never mixes with command output.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "warn,stockroom=debug";

/// `RUST_LOG` wins when set. Otherwise warnings only, or the library at debug
/// with `verbose`.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        VERBOSE_DIRECTIVE
    } else {
        DEFAULT_DIRECTIVE
    };
    let filter_directive = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default_directive.to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
