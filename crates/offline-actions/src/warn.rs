//! Diagnostic sink
//!
//! A single operator-facing warning channel, gated on the `debug` build
//! option. Never fails.

use crate::config::BuildOptions;

/// Emit a library-tagged warning when diagnostics are enabled.
pub(crate) fn warn(message: &str, options: &BuildOptions) {
    if options.debug {
        tracing::warn!(target: "offline_actions", "[offline-actions] {message}");
    }
}
