//! Text sanitization for the glyph alphabet.
//!
//! Incoming text is reduced to uppercase ASCII letters, digits and single
//! spaces, the only characters the glyph atlas carries.

/// Sanitize a raw chunk.
///
/// Whitespace runs collapse to one space, every other character outside
/// `[A-Za-z0-9]` is dropped, and the result is uppercased. A dropped
/// character does not split a whitespace run, so `"a \u{e9} b"` yields
/// `"A B"` and the function is idempotent.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_whitespace = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
            continue;
        }
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_uppercase());
            in_whitespace = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;

    #[test]
    fn test_sanitize_basic() {
        assert_eq!(sanitize("the quick"), "THE QUICK");
        assert_eq!(sanitize("Hello, world!"), "HELLO WORLD");
    }

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(sanitize("a \t\n  b"), "A B");
        assert_eq!(sanitize("  lead"), " LEAD");
        assert_eq!(sanitize("trail\n\n"), "TRAIL ");
    }

    #[test]
    fn test_sanitize_strips_outside_alphabet() {
        assert_eq!(sanitize("caf\u{e9} #1"), "CAF 1");
        assert_eq!(sanitize("a \u{e9} b"), "A B");
        assert_eq!(sanitize("!!!"), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_sanitize_idempotent_quickcheck() {
        #[allow(clippy::needless_pass_by_value)]
        fn prop(raw: String) -> bool {
            let once = sanitize(&raw);
            sanitize(&once) == once
        }

        QuickCheck::new()
            .tests(1_000)
            .quickcheck(prop as fn(String) -> bool);
    }

    #[test]
    fn test_sanitize_alphabet_quickcheck() {
        #[allow(clippy::needless_pass_by_value)]
        fn prop(raw: String) -> bool {
            sanitize(&raw)
                .chars()
                .all(|c| c == ' ' || c.is_ascii_uppercase() || c.is_ascii_digit())
        }

        QuickCheck::new()
            .tests(1_000)
            .quickcheck(prop as fn(String) -> bool);
    }
}
