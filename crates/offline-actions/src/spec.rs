//! Heterogeneous action specs and their normalization
//!
//! Configuration may describe an action role as a callable, a structural
//! record, a raw JSON value, or nothing at all. Normalization resolves the
//! shape exactly once, at the boundary, into a uniform
//! `{call, meta, extras}` triple so the rest of the pipeline never inspects
//! types again.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::meta::MetaFragment;
use crate::{ActionFn, Record};

/// Callable returning an empty record; the default for every unconfigured or
/// unusable role.
pub(crate) fn noop() -> ActionFn {
    Arc::new(|_| Record::new())
}

/// An action role as supplied by configuration.
///
/// Unrecognized values silently degrade to the no-op callable. That fallback
/// is intentional for the optional commit/rollback roles; the initiating role
/// is guarded by an explicit check at registry-build time.
#[derive(Clone, Default)]
pub enum ActionSpec {
    /// Not configured.
    #[default]
    Absent,
    /// A callable invoked with the call-time arguments.
    Call(ActionFn),
    /// A structural record: optional callable, optional metadata fragments,
    /// plus extras spread verbatim into the produced sub-descriptor.
    Record(ActionRecord),
    /// A raw JSON value from declarative configuration. An object acts as a
    /// record of extras; anything else degrades to the no-op.
    Value(Value),
}

impl ActionSpec {
    /// Wrap a callable.
    #[must_use]
    pub fn from_fn(call: impl Fn(&[Value]) -> Record + Send + Sync + 'static) -> Self {
        Self::Call(Arc::new(call))
    }

    /// Wrap a structural record.
    #[inline]
    #[must_use]
    pub fn record(record: ActionRecord) -> Self {
        Self::Record(record)
    }

    /// Wrap a raw JSON value.
    #[inline]
    #[must_use]
    pub fn value(value: Value) -> Self {
        Self::Value(value)
    }

    /// Whether this spec is acceptable as the initiating role.
    pub(crate) fn is_valid_initiator(&self) -> bool {
        matches!(
            self,
            Self::Call(_) | Self::Record(_) | Self::Value(Value::Object(_))
        )
    }

    /// Resolve the heterogeneous shape into the uniform triple.
    pub(crate) fn normalize(&self) -> NormalizedAction {
        match self {
            Self::Call(call) => NormalizedAction {
                call: call.clone(),
                meta: Vec::new(),
                extras: Record::new(),
            },
            Self::Record(record) => NormalizedAction {
                call: record.call.clone().unwrap_or_else(noop),
                meta: record.meta.clone().unwrap_or_default(),
                extras: record.extras.clone(),
            },
            Self::Value(Value::Object(map)) => {
                let mut extras = map.clone();
                // `call` cannot be expressed in JSON; a stray key is dropped
                // rather than spread into the descriptor
                extras.shift_remove("call");
                let meta = match extras.shift_remove("meta") {
                    Some(Value::Array(items)) => {
                        items.iter().filter_map(MetaFragment::from_value).collect()
                    }
                    _ => Vec::new(),
                };
                NormalizedAction {
                    call: noop(),
                    meta,
                    extras,
                }
            }
            Self::Value(_) | Self::Absent => NormalizedAction {
                call: noop(),
                meta: Vec::new(),
                extras: Record::new(),
            },
        }
    }
}

impl fmt::Debug for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Call(_) => f.write_str("Call(..)"),
            Self::Record(record) => f.debug_tuple("Record").field(record).finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// Structural form of an action role.
#[derive(Clone, Default)]
pub struct ActionRecord {
    pub(crate) call: Option<ActionFn>,
    pub(crate) meta: Option<Vec<MetaFragment>>,
    pub(crate) extras: Record,
}

impl ActionRecord {
    /// Create an empty record (no-op callable, no metadata, no extras).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callable, overriding the no-op default.
    #[must_use]
    pub fn with_call(mut self, call: impl Fn(&[Value]) -> Record + Send + Sync + 'static) -> Self {
        self.call = Some(Arc::new(call));
        self
    }

    /// Set the ordered metadata fragment list.
    #[must_use]
    pub fn with_meta(mut self, meta: impl IntoIterator<Item = MetaFragment>) -> Self {
        self.meta = Some(meta.into_iter().collect());
        self
    }

    /// Add one extra field, spread verbatim into the sub-descriptor.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRecord")
            .field("call", &self.call.as_ref().map(|_| ".."))
            .field("meta", &self.meta)
            .field("extras", &self.extras)
            .finish()
    }
}

/// Uniform shape every role resolves to. Ephemeral: computed once per
/// operation at build time and closed over by the factory.
#[derive(Clone)]
pub(crate) struct NormalizedAction {
    pub(crate) call: ActionFn,
    pub(crate) meta: Vec<MetaFragment>,
    pub(crate) extras: Record,
}

impl fmt::Debug for NormalizedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedAction")
            .field("call", &"..")
            .field("meta", &self.meta)
            .field("extras", &self.extras)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn callable_normalizes_to_itself() {
        let spec = ActionSpec::from_fn(|_| {
            let mut record = Record::new();
            record.insert("type".to_string(), json!("PING"));
            record
        });
        let normalized = spec.normalize();
        assert_eq!((normalized.call)(&[])["type"], json!("PING"));
        assert!(normalized.meta.is_empty());
        assert!(normalized.extras.is_empty());
    }

    #[test]
    fn absent_normalizes_to_noop() {
        let normalized = ActionSpec::Absent.normalize();
        assert_eq!((normalized.call)(&[]), Record::new());
        assert!(normalized.extras.is_empty());
    }

    #[test]
    fn scalar_value_degrades_to_noop() {
        let normalized = ActionSpec::value(json!("not a record")).normalize();
        assert_eq!((normalized.call)(&[]), Record::new());
        assert!(normalized.extras.is_empty());
    }

    #[test]
    fn record_call_overrides_noop() {
        let record = ActionRecord::new().with_call(|_| {
            let mut result = Record::new();
            result.insert("type".to_string(), json!("UPDATE_OBJ"));
            result
        });
        let normalized = ActionSpec::record(record).normalize();
        assert_eq!((normalized.call)(&[])["type"], json!("UPDATE_OBJ"));
    }

    #[test]
    fn record_without_call_defaults_to_noop() {
        let record = ActionRecord::new().with_extra("type", json!("ROLLBACK"));
        let normalized = ActionSpec::record(record).normalize();
        assert_eq!((normalized.call)(&[]), Record::new());
        assert_eq!(normalized.extras["type"], json!("ROLLBACK"));
    }

    #[test]
    fn json_object_fields_become_extras() {
        let spec = ActionSpec::value(json!({"type": "ROLLBACK", "time": "now"}));
        let normalized = spec.normalize();
        assert_eq!(normalized.extras["type"], json!("ROLLBACK"));
        assert_eq!(normalized.extras["time"], json!("now"));
    }

    #[test]
    fn json_object_meta_array_becomes_fragments() {
        let spec = ActionSpec::value(json!({"type": "X", "meta": ["id", {"delay": 10}, 42]}));
        let normalized = spec.normalize();
        assert_eq!(
            normalized.meta,
            vec![
                MetaFragment::field("id"),
                MetaFragment::from_value(&json!({"delay": 10})).unwrap(),
            ]
        );
        // meta and call never leak into extras
        assert!(!normalized.extras.contains_key("meta"));
        assert!(!normalized.extras.contains_key("call"));
    }

    #[test]
    fn initiator_validity() {
        assert!(ActionSpec::from_fn(|_| Record::new()).is_valid_initiator());
        assert!(ActionSpec::record(ActionRecord::new()).is_valid_initiator());
        assert!(ActionSpec::value(json!({})).is_valid_initiator());
        assert!(!ActionSpec::Absent.is_valid_initiator());
        assert!(!ActionSpec::value(json!("nope")).is_valid_initiator());
        assert!(!ActionSpec::value(json!(7)).is_valid_initiator());
    }
}
