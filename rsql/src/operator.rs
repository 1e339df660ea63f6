//! Query operators and the grammar their tokens must follow.

/// Renders one `key operator value` leaf into the target representation.
///
/// List-type operators receive the value still wrapped in its literal
/// parentheses; stripping or interpreting the list is the formatter's
/// responsibility, which keeps the parser agnostic about value shape.
pub type FormatterFn = Box<dyn Fn(&str, &str) -> String + Send + Sync>;

/// A query operator: the token as written in an expression plus the
/// formatter producing its rendering.
pub struct Operator {
    token: String,
    formatter: FormatterFn,
}

impl Operator {
    /// Create an operator from a token and a formatter closure.
    ///
    /// The token is checked against the registration grammar when the parser
    /// is built, not here.
    pub fn new(
        token: impl Into<String>,
        formatter: impl Fn(&str, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            token: token.into(),
            formatter: Box::new(formatter),
        }
    }

    /// The token as written in expressions, e.g. `==` or `=in=`.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn format(&self, key: &str, value: &str) -> String {
        (self.formatter)(key, value)
    }
}

impl std::fmt::Debug for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// Check a token against the registration grammar `[!=][^=()]*=`: starts
/// with `=` or `!`, ends with `=`, and the interior contains neither `=`
/// nor parentheses. The whole token must match, a valid substring is not
/// enough.
pub(crate) fn valid_token(token: &str) -> bool {
    if token.len() < 2 {
        return false;
    }
    if !(token.starts_with('=') || token.starts_with('!')) || !token.ends_with('=') {
        return false;
    }
    !token[1..token.len() - 1]
        .chars()
        .any(|c| matches!(c, '=' | '(' | ')'))
}

/// Find the first substring of `s` matching the operator pattern, returning
/// its byte span. Mirrors [`valid_token`]: a candidate starts at a `=`/`!`
/// and runs to the next `=`, failing if a parenthesis intervenes.
pub(crate) fn find_operator(s: &str) -> Option<(usize, usize)> {
    // The pattern alphabet is ASCII, so scanning bytes is safe.
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'=' && b != b'!' {
            continue;
        }
        let mut j = i + 1;
        while j < bytes.len() && !matches!(bytes[j], b'=' | b'(' | b')') {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b'=' {
            return Some((i, j + 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tokens() {
        for token in ["==", "!=", "=gt=", "=in=", "=out=", "!contains="] {
            assert!(valid_token(token), "expected '{token}' to be valid");
        }
    }

    #[test]
    fn test_invalid_tokens() {
        for token in ["", "=", "a==", "==b", "=g=t=", "=g(t=", "=g)t=", "in"] {
            assert!(!valid_token(token), "expected '{token}' to be invalid");
        }
    }

    #[test]
    fn test_find_operator_simple() {
        assert_eq!(find_operator("a==1"), Some((1, 3)));
        assert_eq!(find_operator("a!=1"), Some((1, 3)));
        assert_eq!(find_operator("a=gt=1"), Some((1, 5)));
    }

    #[test]
    fn test_find_operator_list() {
        // The list parentheses stay outside the operator match.
        assert_eq!(find_operator("a=in=(1,2,3)"), Some((1, 5)));
    }

    #[test]
    fn test_find_operator_skips_broken_candidate() {
        // The '!' candidate dies on the parenthesis, the '==' later matches.
        assert_eq!(find_operator("a!(b==1"), Some((4, 6)));
    }

    #[test]
    fn test_find_operator_none() {
        assert_eq!(find_operator("abc"), None);
        assert_eq!(find_operator("a=x(1"), None);
    }
}
