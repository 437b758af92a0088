//! Registry construction
//!
//! [`build`] is the top-level entry point: it validates the configuration,
//! derives the type-constant registry through the external
//! [`offline_types`] collaborator, and builds one [`ActionFactory`] per
//! operation. The result also carries a [`merge`](ActionRegistry::merge)
//! utility for composing multiple registries.

use std::fmt;

use indexmap::IndexMap;

use crate::config::{ActionConfig, BuildOptions};
use crate::error::ConfigError;
use crate::factory::ActionFactory;
use crate::naming::camel_to_screaming_snake;
use crate::warn::warn;

/// Type-constant and factory registries built from one configuration.
///
/// Both maps are immutable after construction and iterate in configuration
/// order.
#[derive(Clone)]
pub struct ActionRegistry {
    types: IndexMap<String, String>,
    creators: IndexMap<String, ActionFactory>,
    from_empty: bool,
}

/// Result of composing two registries via [`ActionRegistry::merge`].
#[derive(Debug, Clone)]
pub struct MergedRegistries {
    /// Combined type-constant registry.
    pub types: IndexMap<String, String>,
    /// Combined factory registry.
    pub creators: IndexMap<String, ActionFactory>,
}

/// Build the type-constant and factory registries from a configuration.
///
/// An empty configuration is not an error: it emits one diagnostic and
/// yields empty registries whose `merge` echoes its arguments.
///
/// # Errors
/// - [`ConfigError::Missing`] when `config` is `None`.
/// - [`ConfigError::InvalidOffline`] when any operation's initiating spec is
///   neither a callable nor a record.
pub fn build(
    config: Option<ActionConfig>,
    options: &BuildOptions,
) -> Result<ActionRegistry, ConfigError> {
    let Some(config) = config else {
        return Err(ConfigError::Missing);
    };

    if config.is_empty() {
        warn("empty configuration passed to build", options);
        return Ok(ActionRegistry {
            types: IndexMap::new(),
            creators: IndexMap::new(),
            from_empty: true,
        });
    }

    let joined = config
        .names()
        .map(camel_to_screaming_snake)
        .collect::<Vec<_>>()
        .join(" ");
    let types = offline_types::make_types(&joined, &options.type_options());

    let mut creators = IndexMap::with_capacity(config.len());
    for (name, spec) in config.iter() {
        creators.insert(name.clone(), ActionFactory::build(name, spec)?);
    }

    Ok(ActionRegistry {
        types,
        creators,
        from_empty: false,
    })
}

impl ActionRegistry {
    /// The type-constant registry, keyed by SCREAMING_SNAKE operation name.
    #[inline]
    #[must_use]
    pub fn types(&self) -> &IndexMap<String, String> {
        &self.types
    }

    /// The factory registry, keyed by the original operation name.
    #[inline]
    #[must_use]
    pub fn creators(&self) -> &IndexMap<String, ActionFactory> {
        &self.creators
    }

    /// Look up one factory by operation name.
    #[inline]
    #[must_use]
    pub fn creator(&self, name: &str) -> Option<&ActionFactory> {
        self.creators.get(name)
    }

    /// Whether both registries are empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    /// Number of operations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.creators.len()
    }

    /// Compose this registry with another pair of maps.
    ///
    /// The locally built entries win on key collision. Neither input is
    /// mutated. A registry built from an empty configuration echoes the
    /// supplied maps unchanged instead of merging (historical behavior,
    /// preserved deliberately).
    #[must_use]
    pub fn merge(
        &self,
        other_types: &IndexMap<String, String>,
        other_creators: &IndexMap<String, ActionFactory>,
    ) -> MergedRegistries {
        if self.from_empty {
            return MergedRegistries {
                types: other_types.clone(),
                creators: other_creators.clone(),
            };
        }

        let mut types = other_types.clone();
        for (name, constant) in &self.types {
            types.insert(name.clone(), constant.clone());
        }

        let mut creators = other_creators.clone();
        for (name, factory) in &self.creators {
            creators.insert(name.clone(), factory.clone());
        }

        MergedRegistries { types, creators }
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("types", &self.types)
            .field("creators", &self.creators.keys().collect::<Vec<_>>())
            .field("from_empty", &self.from_empty)
            .finish()
    }
}
