//! Escaping of token values for the serialized markup

use std::borrow::Cow;

/// Replaces `<`, `>`, `"` and `&` with their named entities.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_markup(value: &str) -> Cow<'_, str> {
    if !value.contains(['<', '>', '"', '&']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '&' => escaped.push_str("&amp;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_markup("<"), "&lt;");
        assert_eq!(escape_markup(">"), "&gt;");
        assert_eq!(escape_markup("\""), "&quot;");
        assert_eq!(escape_markup("&"), "&amp;");
        assert_eq!(escape_markup("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_plain_value_is_borrowed() {
        assert!(matches!(escape_markup("while"), Cow::Borrowed("while")));
    }

    proptest! {
        #[test]
        fn escaped_output_has_no_raw_markup(value in ".*") {
            let escaped = escape_markup(&value);
            prop_assert!(!escaped.contains(['<', '>', '"']));
            for (idx, _) in escaped.match_indices('&') {
                let rest = &escaped[idx..];
                prop_assert!(
                    ["&lt;", "&gt;", "&quot;", "&amp;"].iter().any(|e| rest.starts_with(e))
                );
            }
        }
    }
}
