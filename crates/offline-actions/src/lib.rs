//! Offline action descriptor synthesis
//!
//! Builds composite "action descriptor" objects from a declarative
//! configuration. Each named operation describes an initiating action plus
//! optional commit/rollback outcomes, a side-effect template, and metadata;
//! [`build`] turns the whole configuration into:
//!
//! - a type-constant registry, one SCREAMING_SNAKE constant per operation
//!   (derived through the [`offline_types`] collaborator), and
//! - a factory registry, one [`ActionFactory`] per operation that assembles
//!   the full nested descriptor from call-time arguments.
//!
//! # Core Concepts
//!
//! - [`ActionSpec`]: a role (initiating/commit/rollback) as configured —
//!   callable, record, raw value, or absent
//! - [`MetaFragment`]: field reference or literal record contributing to a
//!   role's resolved metadata
//! - [`OperationSpec`] / [`ActionConfig`]: the declarative configuration
//! - [`ActionRegistry`]: the built registries plus a `merge` utility
//!
//! # Example
//! ```
//! use offline_actions::{build, ActionConfig, ActionSpec, BuildOptions, OperationSpec, Record};
//! use serde_json::json;
//!
//! let config = ActionConfig::new().with_operation(
//!     "createOfflineObj",
//!     OperationSpec::new(ActionSpec::from_fn(|args| {
//!         let mut action = Record::new();
//!         action.insert("type".to_string(), json!("CREATE_OBJ"));
//!         action.insert("id".to_string(), args[0].clone());
//!         action
//!     }))
//!     .with_effect(json!({"url": "/api/create", "method": "POST", "body": {}})),
//! );
//!
//! let registry = build(Some(config), &BuildOptions::default())?;
//! assert_eq!(registry.types()["CREATE_OFFLINE_OBJ"], "CREATE_OFFLINE_OBJ");
//!
//! let descriptor = registry.creator("createOfflineObj").unwrap().create(&[json!(999)]);
//! assert_eq!(descriptor["type"], json!("CREATE_OBJ"));
//! assert_eq!(descriptor["meta"]["offline"]["effect"]["body"]["id"], json!(999));
//! # Ok::<(), offline_actions::ConfigError>(())
//! ```
//!
//! The crate only builds descriptors; it never executes effects, performs
//! I/O, or dispatches anything.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod effect;
mod error;
mod factory;
mod merge;
mod meta;
mod naming;
mod registry;
mod spec;
mod warn;

pub use config::{ActionConfig, BuildOptions, OperationSpec};
pub use error::ConfigError;
pub use factory::ActionFactory;
pub use meta::MetaFragment;
pub use naming::camel_to_screaming_snake;
pub use registry::{build, ActionRegistry, MergedRegistries};
pub use spec::{ActionRecord, ActionSpec};

/// A dynamic record: field names mapped to JSON values, in insertion order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// An action callable, invoked with the call-time arguments.
pub type ActionFn =
    std::sync::Arc<dyn Fn(&[serde_json::Value]) -> Record + Send + Sync>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
