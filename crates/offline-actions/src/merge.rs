//! Later-wins record merge
//!
//! Every layered merge in the descriptor pipeline goes through this one
//! routine so the precedence rule is stated exactly once: a key from `src`
//! overrides the same key in `dest`, while a key already present keeps its
//! original position (the `preserve_order` map updates in place).

use crate::Record;

/// Merge `src` into `dest`, `src` winning on key collision.
pub(crate) fn merge_into(dest: &mut Record, src: &Record) {
    for (key, value) in src {
        dest.insert(key.clone(), value.clone());
    }
}
