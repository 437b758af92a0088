//! Error types for registry construction
//!
//! Only two conditions are fatal: a missing configuration and an invalid
//! initiating spec. Everything else irregular (missing commit/rollback,
//! non-record effect, absent meta) degrades to defaults by design.

/// Registry construction errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No configuration was supplied at all.
    #[error("[offline-actions] a configuration is required to set up types and creators")]
    Missing,

    /// An operation's initiating spec is neither a callable nor a record.
    #[error("[offline-actions] offline spec for `{operation}` must be either an action fn or a record")]
    InvalidOffline {
        /// Name of the offending operation.
        operation: String,
    },
}
