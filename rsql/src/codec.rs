//! Escape handling for characters that are significant to the expression
//! grammar.
//!
//! `\(`, `\)`, `\,`, `\;` and `\=` are swapped for reversible placeholder
//! sequences before scanning starts and swapped back after the whole result
//! tree has been rendered. Both passes happen exactly once, at the outermost
//! process boundary: decoding at an intermediate recursion level could
//! reverse a placeholder buried inside a nested literal.

/// Escape table mapping literal escaped pairs to their placeholders.
///
/// The placeholders are not collision-free against input that already
/// contains a literal `%5C%28`-style sequence. Known limitation of the
/// scheme, kept as-is.
const ESCAPES: [(&str, &str); 5] = [
    (r"\(", "%5C%28"),
    (r"\)", "%5C%29"),
    (r"\,", "%5C%2C"),
    (r"\;", "%5C%3B"),
    (r"\=", "%5C%3D"),
];

/// Replace every escaped syntax character with its placeholder.
pub(crate) fn encode(s: &str) -> String {
    let mut out = s.to_string();
    for (literal, placeholder) in ESCAPES {
        out = out.replace(literal, placeholder);
    }
    out
}

/// Reverse [`encode`], restoring the literal escaped pairs.
pub(crate) fn decode(s: &str) -> String {
    let mut out = s.to_string();
    for (literal, placeholder) in ESCAPES {
        out = out.replace(placeholder, literal);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_special() {
        assert_eq!(
            encode(r"(x==1;y=='\(hello\, how are you?\;thanks\)')"),
            "(x==1;y=='%5C%28hello%5C%2C how are you?%5C%3Bthanks%5C%29')"
        );
    }

    #[test]
    fn test_decode_special() {
        assert_eq!(
            decode("(x==1;y=='%5C%28hello%5C%2C how are you?%5C%3Bthanks%5C%29')"),
            r"(x==1;y=='\(hello\, how are you?\;thanks\)')"
        );
    }

    #[test]
    fn test_round_trip() {
        let s = r"a==\=1;b=in=(\(x\),\;y)";
        assert_eq!(decode(&encode(s)), s);
    }

    #[test]
    fn test_plain_strings_untouched() {
        assert_eq!(encode("a==1,b==2"), "a==1,b==2");
        assert_eq!(decode("a==1,b==2"), "a==1,b==2");
    }

    #[test]
    fn test_encoded_text_hides_syntax() {
        // An escaped separator must not survive as a bare syntax character.
        let encoded = encode(r"a=='x\,y'");
        assert!(!encoded.contains(','));
    }
}
