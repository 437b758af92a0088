//! Side-effect template composition
//!
//! Merges the call-time payload into a template's `body` field. All sibling
//! template fields pass through untouched; `body` is re-inserted last, after
//! the siblings.

use serde_json::Value;

use crate::merge::merge_into;
use crate::Record;

/// Compose an effect record from an optional template and the payload.
///
/// Returns `None` when the template is absent or not a record, which the
/// caller must translate into "no `effect` key at all".
pub(crate) fn compose_effect(template: Option<&Value>, payload: &Record) -> Option<Value> {
    let Some(Value::Object(template)) = template else {
        return None;
    };

    let mut effect = template.clone();
    let mut body = match effect.shift_remove("body") {
        Some(Value::Object(body)) => body,
        // non-record body degrades to the payload alone
        _ => Record::new(),
    };
    merge_into(&mut body, payload);
    effect.insert("body".to_string(), Value::Object(body));

    Some(Value::Object(effect))
}
