//! Attribute name amendment.
//!
//! Rust callers often spell hyphenated markup attributes with underscores
//! (`data_columns`) and reserved words with a trailing underscore
//! (`class_`, `for_`). At render time:
//! - `class_` → `class`, `for_` → `for`
//! - any other key has every `_` replaced with `-` (`data_columns` → `data-columns`)
//! - keys without `_` pass through unchanged

use std::borrow::Cow;

/// Compute the markup attribute name for a stored key, borrowing when unchanged.
#[inline]
pub fn attr_name(key: &str) -> Cow<'_, str> {
    match key {
        "class_" | "for_" => Cow::Borrowed(&key[..key.len() - 1]),
        _ if key.contains('_') => Cow::Owned(key.replace('_', "-")),
        _ => Cow::Borrowed(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys_drop_the_underscore() {
        assert_eq!(attr_name("class_"), "class");
        assert_eq!(attr_name("for_"), "for");
    }

    #[test]
    fn underscores_become_hyphens() {
        assert_eq!(attr_name("data_attr"), "data-attr");
        assert_eq!(attr_name("aria_label_by"), "aria-label-by");
        assert_eq!(attr_name("type_"), "type-");
    }

    #[test]
    fn plain_keys_borrow() {
        assert!(matches!(attr_name("href"), Cow::Borrowed("href")));
        assert!(matches!(attr_name("class_"), Cow::Borrowed("class")));
        assert!(matches!(attr_name("data_x"), Cow::Owned(_)));
    }
}
