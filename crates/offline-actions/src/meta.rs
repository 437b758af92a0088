//! Metadata fragments and their resolution
//!
//! A commit/rollback role may carry an ordered list of metadata fragments.
//! Each fragment is either a field reference, resolved against the call-time
//! payload, or a literal record merged verbatim.

use serde_json::Value;

use crate::merge::merge_into;
use crate::Record;

/// One fragment of a role's metadata list.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaFragment {
    /// A field name resolved against the call-time payload as
    /// `{name: payload[name]}` (`null` when the payload lacks the field).
    Field(String),
    /// A literal record merged verbatim.
    Literal(Record),
}

impl MetaFragment {
    /// Reference a payload field by name.
    #[inline]
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Wrap a literal record.
    #[inline]
    #[must_use]
    pub fn literal(record: Record) -> Self {
        Self::Literal(record)
    }

    /// Interpret a raw configuration value as a fragment.
    ///
    /// Strings become field references, objects become literals, anything
    /// else is dropped.
    pub(crate) fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::Field(name.clone())),
            Value::Object(record) => Some(Self::Literal(record.clone())),
            _ => None,
        }
    }
}

/// Resolve an ordered fragment list into one flat record.
///
/// Field references are resolved first in their original order, then literal
/// records are merged on top in theirs, so a literal always overrides a field
/// reference on key collision regardless of where it appeared in the list.
pub(crate) fn resolve_meta(fragments: &[MetaFragment], payload: &Record) -> Record {
    let mut resolved = Record::new();
    for fragment in fragments {
        if let MetaFragment::Field(name) = fragment {
            let value = payload.get(name).cloned().unwrap_or(Value::Null);
            resolved.insert(name.clone(), value);
        }
    }
    for fragment in fragments {
        if let MetaFragment::Literal(record) = fragment {
            merge_into(&mut resolved, record);
        }
    }
    resolved
}
