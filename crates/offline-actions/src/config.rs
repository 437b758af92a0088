//! Configuration surface
//!
//! [`ActionConfig`] is the insertion-ordered map of named operation specs fed
//! to [`build`](crate::build); [`OperationSpec`] describes one operation's
//! initiating/commit/rollback triple; [`BuildOptions`] carries the knobs
//! forwarded to the collaborators.

use indexmap::IndexMap;
use offline_types::TypeOptions;
use serde_json::Value;

use crate::spec::ActionSpec;
use crate::Record;

/// One named operation: the initiating action plus its optional side-effect
/// template, commit/rollback roles, and operation-level metadata.
#[derive(Debug, Clone, Default)]
pub struct OperationSpec {
    pub(crate) offline: ActionSpec,
    pub(crate) effect: Option<Value>,
    pub(crate) commit: ActionSpec,
    pub(crate) rollback: ActionSpec,
    pub(crate) meta: Option<Record>,
}

impl OperationSpec {
    /// Create a spec from its initiating action.
    ///
    /// The initiating spec must be a callable or a record; anything else is
    /// rejected at registry-build time.
    #[inline]
    #[must_use]
    pub fn new(offline: ActionSpec) -> Self {
        Self {
            offline,
            ..Self::default()
        }
    }

    /// Set the side-effect template. A non-record value is tolerated and
    /// simply produces no effect.
    #[inline]
    #[must_use]
    pub fn with_effect(mut self, template: Value) -> Self {
        self.effect = Some(template);
        self
    }

    /// Set the commit role.
    #[inline]
    #[must_use]
    pub fn with_commit(mut self, commit: ActionSpec) -> Self {
        self.commit = commit;
        self
    }

    /// Set the rollback role.
    #[inline]
    #[must_use]
    pub fn with_rollback(mut self, rollback: ActionSpec) -> Self {
        self.rollback = rollback;
        self
    }

    /// Set the operation-level metadata record, merged last into the final
    /// descriptor's `meta` (its keys win over the synthesized `offline` key).
    #[inline]
    #[must_use]
    pub fn with_meta(mut self, meta: Record) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Named, insertion-ordered map of operation specs.
#[derive(Debug, Clone, Default)]
pub struct ActionConfig {
    operations: IndexMap<String, OperationSpec>,
}

impl ActionConfig {
    /// Create an empty configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation, replacing any previous spec under the same name.
    #[must_use]
    pub fn with_operation(mut self, name: impl Into<String>, spec: OperationSpec) -> Self {
        self.operations.insert(name.into(), spec);
        self
    }

    /// Add an operation in place.
    pub fn insert(&mut self, name: impl Into<String>, spec: OperationSpec) {
        self.operations.insert(name.into(), spec);
    }

    /// Whether the configuration has no operations.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Iterate over operations in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &OperationSpec)> {
        self.operations.iter()
    }

    /// Operation names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

impl FromIterator<(String, OperationSpec)> for ActionConfig {
    fn from_iter<I: IntoIterator<Item = (String, OperationSpec)>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}

/// Options recognized by [`build`](crate::build).
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Prefix forwarded verbatim to the type-constant registry.
    pub prefix: Option<String>,
    /// Enables the diagnostic sink. Off by default.
    pub debug: bool,
}

impl BuildOptions {
    /// Create default options (no prefix, diagnostics off).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the type-constant prefix.
    #[inline]
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Enable the diagnostic sink.
    #[inline]
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Options forwarded to the type-constant registry collaborator.
    pub(crate) fn type_options(&self) -> TypeOptions {
        TypeOptions {
            prefix: self.prefix.clone(),
        }
    }
}
