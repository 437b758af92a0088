//! Descriptor factory
//!
//! [`ActionFactory`] closes over one operation's normalized roles and, given
//! call-time arguments, assembles the full nested descriptor: the initiating
//! result split into `type` and payload, the composed side effect, the commit
//! and rollback sub-descriptors, and the layered metadata.
//!
//! Field precedence is the later-wins rule of [`merge_into`], applied in a
//! fixed assembly order, so every collision resolves the same way on every
//! call.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::OperationSpec;
use crate::effect::compose_effect;
use crate::error::ConfigError;
use crate::merge::merge_into;
use crate::meta::resolve_meta;
use crate::spec::NormalizedAction;
use crate::Record;

/// Factory producing descriptors for one operation.
///
/// Cheap to clone; all per-operation state is shared behind an [`Arc`] and
/// [`create`](Self::create) computes everything per call from its arguments,
/// so a factory may be invoked repeatedly and concurrently.
#[derive(Clone)]
pub struct ActionFactory {
    inner: Arc<FactoryInner>,
}

struct FactoryInner {
    offline: NormalizedAction,
    commit: NormalizedAction,
    rollback: NormalizedAction,
    effect: Option<Value>,
    meta: Record,
}

impl ActionFactory {
    /// Build a factory from one operation spec.
    ///
    /// # Errors
    /// [`ConfigError::InvalidOffline`] when the initiating spec is neither a
    /// callable nor a record. This is the only failure in the pipeline and it
    /// happens here, at build time, never at call time.
    pub(crate) fn build(name: &str, spec: &OperationSpec) -> Result<Self, ConfigError> {
        if !spec.offline.is_valid_initiator() {
            return Err(ConfigError::InvalidOffline {
                operation: name.to_string(),
            });
        }

        Ok(Self {
            inner: Arc::new(FactoryInner {
                offline: spec.offline.normalize(),
                commit: spec.commit.normalize(),
                rollback: spec.rollback.normalize(),
                effect: spec.effect.clone(),
                meta: spec.meta.clone().unwrap_or_default(),
            }),
        })
    }

    /// Assemble a descriptor from the call-time arguments.
    ///
    /// All three role callables receive the same `args`. The initiating
    /// result supplies the top-level `type` (omitted when the result has
    /// none) and the payload; the payload feeds the effect body and every
    /// metadata resolution.
    #[must_use]
    pub fn create(&self, args: &[Value]) -> Value {
        let inner = &self.inner;

        let mut payload = (inner.offline.call)(args);
        let commit_result = (inner.commit.call)(args);
        let rollback_result = (inner.rollback.call)(args);

        let action_type = payload.shift_remove("type");

        let commit = sub_descriptor(commit_result, &inner.commit, &payload);
        let rollback = sub_descriptor(rollback_result, &inner.rollback, &payload);

        let mut offline = Record::new();
        if let Some(effect) = compose_effect(inner.effect.as_ref(), &payload) {
            offline.insert("effect".to_string(), effect);
        }
        offline.insert("commit".to_string(), Value::Object(commit));
        offline.insert("rollback".to_string(), Value::Object(rollback));

        // operation-level meta merges over the synthesized wrapper; an
        // explicit `offline` key shadows the whole structure
        let mut meta = Record::new();
        meta.insert("offline".to_string(), Value::Object(offline));
        merge_into(&mut meta, &inner.meta);

        let mut descriptor = Record::new();
        if let Some(action_type) = action_type {
            descriptor.insert("type".to_string(), action_type);
        }
        merge_into(&mut descriptor, &payload);
        descriptor.insert("payload".to_string(), Value::Object(payload));
        merge_into(&mut descriptor, &inner.offline.extras);
        descriptor.insert("meta".to_string(), Value::Object(meta));

        Value::Object(descriptor)
    }
}

/// Commit/rollback sub-descriptor: the role result, the role extras on top,
/// then the resolved metadata under `meta`.
fn sub_descriptor(result: Record, role: &NormalizedAction, payload: &Record) -> Record {
    let mut sub = result;
    merge_into(&mut sub, &role.extras);
    sub.insert(
        "meta".to_string(),
        Value::Object(resolve_meta(&role.meta, payload)),
    );
    sub
}

impl fmt::Debug for ActionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionFactory")
            .field("effect", &self.inner.effect)
            .field("meta", &self.inner.meta)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MetaFragment;
    use crate::spec::{ActionRecord, ActionSpec};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn create_obj() -> ActionSpec {
        ActionSpec::from_fn(|args| {
            let mut action = Record::new();
            action.insert("type".to_string(), json!("CREATE_OBJ"));
            action.insert("id".to_string(), args[0].clone());
            action.insert("name".to_string(), args[1].clone());
            action
        })
    }

    #[test]
    fn rejects_absent_offline() {
        let spec = OperationSpec::default();
        let err = ActionFactory::build("createOfflineObj", &spec).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOffline { operation } if operation == "createOfflineObj"
        ));
    }

    #[test]
    fn rejects_scalar_offline() {
        let spec = OperationSpec::new(ActionSpec::value(json!("CREATE")));
        assert!(ActionFactory::build("op", &spec).is_err());

        let spec = OperationSpec::new(ActionSpec::value(json!(5)));
        assert!(ActionFactory::build("op", &spec).is_err());
    }

    #[test]
    fn offline_result_splits_into_type_and_payload() {
        let factory = ActionFactory::build("op", &OperationSpec::new(create_obj())).unwrap();
        let descriptor = factory.create(&[json!(999), json!("nine-nine-nine")]);

        assert_eq!(descriptor["type"], json!("CREATE_OBJ"));
        assert_eq!(descriptor["id"], json!(999));
        assert_eq!(descriptor["payload"], json!({"id": 999, "name": "nine-nine-nine"}));
        assert!(descriptor["payload"].get("type").is_none());
    }

    #[test]
    fn type_key_is_omitted_when_result_has_none() {
        let offline = ActionSpec::from_fn(|_| {
            let mut action = Record::new();
            action.insert("id".to_string(), json!(1));
            action
        });
        let factory = ActionFactory::build("op", &OperationSpec::new(offline)).unwrap();
        let descriptor = factory.create(&[]);
        assert!(descriptor.get("type").is_none());
        assert_eq!(descriptor["id"], json!(1));
    }

    #[test]
    fn missing_roles_degenerate_to_empty_meta() {
        let factory = ActionFactory::build("op", &OperationSpec::new(create_obj())).unwrap();
        let descriptor = factory.create(&[json!(1), json!("one")]);

        assert_eq!(descriptor["meta"]["offline"]["commit"], json!({"meta": {}}));
        assert_eq!(descriptor["meta"]["offline"]["rollback"], json!({"meta": {}}));
    }

    #[test]
    fn omitted_effect_leaves_no_key() {
        let factory = ActionFactory::build("op", &OperationSpec::new(create_obj())).unwrap();
        let descriptor = factory.create(&[json!(1), json!("one")]);
        assert!(descriptor["meta"]["offline"].get("effect").is_none());
    }

    #[test]
    fn commit_meta_fragments_resolve_against_payload() {
        let spec = OperationSpec::new(create_obj()).with_commit(ActionSpec::record(
            ActionRecord::new()
                .with_call(|_| Record::new())
                .with_meta([MetaFragment::field("id"), MetaFragment::field("name")]),
        ));
        let factory = ActionFactory::build("op", &spec).unwrap();
        let descriptor = factory.create(&[json!(999), json!("nine-nine-nine")]);

        assert_eq!(
            descriptor["meta"]["offline"]["commit"]["meta"],
            json!({"id": 999, "name": "nine-nine-nine"})
        );
    }

    #[test]
    fn record_extras_spread_into_sub_descriptor() {
        let spec = OperationSpec::new(create_obj()).with_rollback(ActionSpec::value(
            json!({"type": "ROLLBACK", "time": "now", "strategy": "merge"}),
        ));
        let factory = ActionFactory::build("op", &spec).unwrap();
        let descriptor = factory.create(&[json!(1), json!("one")]);

        assert_eq!(
            descriptor["meta"]["offline"]["rollback"],
            json!({"type": "ROLLBACK", "time": "now", "strategy": "merge", "meta": {}})
        );
    }

    #[test]
    fn offline_extras_shadow_payload_fields() {
        let offline = ActionSpec::record(
            ActionRecord::new()
                .with_call(|_| {
                    let mut action = Record::new();
                    action.insert("type".to_string(), json!("T"));
                    action.insert("source".to_string(), json!("call"));
                    action
                })
                .with_extra("source", json!("extras")),
        );
        let factory = ActionFactory::build("op", &OperationSpec::new(offline)).unwrap();
        let descriptor = factory.create(&[]);

        assert_eq!(descriptor["source"], json!("extras"));
        // the payload key itself still carries the call's value
        assert_eq!(descriptor["payload"]["source"], json!("call"));
    }

    #[test]
    fn operation_meta_can_shadow_offline_wrapper() {
        let mut meta = Record::new();
        meta.insert("offline".to_string(), json!("shadowed"));
        let spec = OperationSpec::new(create_obj()).with_meta(meta);
        let factory = ActionFactory::build("op", &spec).unwrap();
        let descriptor = factory.create(&[json!(1), json!("one")]);

        assert_eq!(descriptor["meta"]["offline"], json!("shadowed"));
    }

    #[test]
    fn create_is_idempotent() {
        let spec = OperationSpec::new(create_obj())
            .with_effect(json!({"url": "/api/create", "body": {"a": 1}}));
        let factory = ActionFactory::build("op", &spec).unwrap();

        let first = factory.create(&[json!(999), json!("nine-nine-nine")]);
        let second = factory.create(&[json!(999), json!("nine-nine-nine")]);
        assert_eq!(first, second);
    }

    #[test]
    fn top_level_field_order_is_stable() {
        let factory = ActionFactory::build("op", &OperationSpec::new(create_obj())).unwrap();
        let Value::Object(descriptor) = factory.create(&[json!(1), json!("one")]) else {
            panic!("descriptor must be a record");
        };
        let keys: Vec<_> = descriptor.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["type", "id", "name", "payload", "meta"]);
    }
}
