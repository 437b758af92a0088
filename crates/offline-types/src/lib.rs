//! Type-constant registry for symbolic action names
//!
//! Turns a space-separated list of symbolic names into an ordered map from
//! name to unique string constant. Consumed by the descriptor-synthesis core
//! as a black box: it only guarantees one entry per distinct name, stable
//! across calls for the same input.
//!
//! # Example
//! ```
//! use offline_types::{make_types, TypeOptions};
//!
//! let types = make_types("CREATE_OBJ DELETE_OBJ", &TypeOptions::default());
//! assert_eq!(types["CREATE_OBJ"], "CREATE_OBJ");
//!
//! let prefixed = make_types("CREATE_OBJ", &TypeOptions::new().with_prefix("app/"));
//! assert_eq!(prefixed["CREATE_OBJ"], "app/CREATE_OBJ");
//! ```

use indexmap::IndexMap;

/// Options for [`make_types`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeOptions {
    /// Prefix prepended to every produced constant (not to the key).
    pub prefix: Option<String>,
}

impl TypeOptions {
    /// Create options with no prefix.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the constant prefix.
    #[inline]
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Build a name → constant map from a whitespace-separated name list.
///
/// Repeated names collapse to a single entry; the first occurrence fixes the
/// position. The constant is `prefix + name`, the key is the bare name.
#[must_use]
pub fn make_types(names: &str, options: &TypeOptions) -> IndexMap<String, String> {
    let prefix = options.prefix.as_deref().unwrap_or("");

    let mut types = IndexMap::new();
    for name in names.split_ascii_whitespace() {
        types
            .entry(name.to_string())
            .or_insert_with(|| format!("{prefix}{name}"));
    }
    types
}
