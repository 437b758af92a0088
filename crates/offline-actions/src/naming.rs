//! Symbolic name derivation
//!
//! Maps camelCase operation names to SCREAMING_SNAKE_CASE symbolic names for
//! the type-constant registry.

/// Convert a camelCase word into a SCREAMING_SNAKE_CASE word.
///
/// A separator is inserted before every ASCII capital except a leading one,
/// then the whole result is uppercased.
///
/// # Example
/// ```
/// use offline_actions::camel_to_screaming_snake;
///
/// assert_eq!(camel_to_screaming_snake("createOfflineObj"), "CREATE_OFFLINE_OBJ");
/// ```
#[must_use]
pub fn camel_to_screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            out.push('_');
        }
        out.extend(ch.to_uppercase());
    }
    out
}
