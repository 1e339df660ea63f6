//! Balanced-parenthesis scanning over raw expression text.
//!
//! Both scanners return byte-index spans into the original string so callers
//! can slice the input directly. Separators nested inside parentheses are
//! invisible to [`find_parts`], and parentheses opening a list value (right
//! after an operator token, as in `tags=in=(a,b)`) are invisible to
//! [`find_outer_parentheses`].

use crate::error::ParseError;

/// Find the top-level segments of `s` split on any of `separators`,
/// ignoring separators nested inside parentheses.
///
/// Returns half-open byte spans in left-to-right order. `limit` caps how
/// many splits are taken from the left; the remaining text becomes the
/// final span. `None` means unlimited.
pub(crate) fn find_parts(
    s: &str,
    separators: &[char],
    limit: Option<usize>,
) -> Result<Vec<(usize, usize)>, ParseError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    if separators.is_empty() {
        return Err(ParseError::MissingSeparators);
    }
    let starts_with_sep = s.chars().next().is_some_and(|c| separators.contains(&c));
    let ends_with_sep = s.chars().next_back().is_some_and(|c| separators.contains(&c));
    if starts_with_sep || ends_with_sep {
        return Err(ParseError::EmptyBoundarySeparator(s.to_string()));
    }

    let mut spans = Vec::new();
    let mut start = 0;
    let mut depth = 0i32;
    let mut taken = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(ParseError::MismatchedParentheses(s.to_string()));
                }
            }
            c if depth == 0 && separators.contains(&c) => {
                spans.push((start, i));
                start = i + c.len_utf8();
                taken += 1;
                if limit == Some(taken) {
                    break;
                }
            }
            _ => {}
        }
    }
    if start < s.len() {
        spans.push((start, s.len()));
    }
    Ok(spans)
}

/// Find the top-level *grouping* parenthesis spans of `s`.
///
/// Returns the byte indexes of each matching `(` and `)` pair, in order.
/// Parentheses that open inside an operator token delimit a list value, not
/// a group; they are tracked with a separate depth counter and skipped. The
/// in-operator flag is set on `=`/`!` and cleared on a top-level separator
/// or on a closed group. List values must stay flat: a parenthesis nested
/// inside a list value is an error, as is any open/close mismatch. `limit`
/// caps how many groups are reported; `None` means all of them.
pub(crate) fn find_outer_parentheses(
    s: &str,
    limit: Option<usize>,
) -> Result<Vec<(usize, usize)>, ParseError> {
    if s.matches('(').count() != s.matches(')').count() {
        return Err(ParseError::MismatchedParentheses(s.to_string()));
    }

    let mut spans = Vec::new();
    let mut start = 0;
    let mut depth = 0i32;
    let mut list_depth = 0i32;
    let mut in_operator = false;
    let mut found = 0;
    for (i, c) in s.char_indices() {
        match c {
            '=' | '!' => in_operator = true,
            ',' | ';' if list_depth == 0 => in_operator = false,
            '(' if in_operator => {
                if list_depth > 0 {
                    return Err(ParseError::MismatchedParentheses(s.to_string()));
                }
                list_depth += 1;
            }
            '(' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ')' => {
                if list_depth > 0 {
                    list_depth -= 1;
                    continue;
                }
                depth -= 1;
                if depth < 0 {
                    return Err(ParseError::MismatchedParentheses(s.to_string()));
                }
                if depth == 0 {
                    in_operator = false;
                    spans.push((start, i));
                    found += 1;
                    if limit == Some(found) {
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_empty() {
        assert_eq!(find_parts("", &[','], None).unwrap(), vec![]);
    }

    #[test]
    fn test_parts_no_separators_given() {
        assert_eq!(
            find_parts("(a==1),(b==1)", &[], None),
            Err(ParseError::MissingSeparators)
        );
    }

    #[test]
    fn test_parts_starts_with_separator() {
        assert_eq!(
            find_parts(",(a==1),(b==1)", &[','], None),
            Err(ParseError::EmptyBoundarySeparator(",(a==1),(b==1)".into()))
        );
    }

    #[test]
    fn test_parts_ends_with_separator() {
        assert_eq!(
            find_parts("(a==1),(b==1),", &[','], None),
            Err(ParseError::EmptyBoundarySeparator("(a==1),(b==1),".into()))
        );
    }

    #[test]
    fn test_parts_parentheses_mismatch() {
        assert!(matches!(
            find_parts("(a==1)),(b==1)", &[','], None),
            Err(ParseError::MismatchedParentheses(_))
        ));
    }

    #[test]
    fn test_parts_parentheses_mismatch_in_operation() {
        assert!(matches!(
            find_parts("a=in=(1),2,3)", &[','], None),
            Err(ParseError::MismatchedParentheses(_))
        ));
    }

    #[test]
    fn test_parts_simple_or() {
        assert_eq!(
            find_parts("(a==1),(b==1)", &[','], None).unwrap(),
            vec![(0, 6), (7, 13)]
        );
    }

    #[test]
    fn test_parts_simple_and() {
        assert_eq!(
            find_parts("(a==1);(b==1)", &[';'], None).unwrap(),
            vec![(0, 6), (7, 13)]
        );
    }

    #[test]
    fn test_parts_nested() {
        assert_eq!(
            find_parts("((a==1),(b==1)),(c==1)", &[','], None).unwrap(),
            vec![(0, 15), (16, 22)]
        );
    }

    #[test]
    fn test_parts_separator_inside_list_ignored() {
        assert_eq!(
            find_parts("a=in=(1,2,3),b==2", &[','], None).unwrap(),
            vec![(0, 12), (13, 17)]
        );
    }

    #[test]
    fn test_parts_limit_keeps_remainder() {
        // The remainder after the capped split stays intact as the last span.
        assert_eq!(
            find_parts("(a==1),(b==1),(c==1)", &[','], Some(1)).unwrap(),
            vec![(0, 6), (7, 20)]
        );
    }

    #[test]
    fn test_outer_mismatch() {
        assert!(matches!(
            find_outer_parentheses("(x)(a(b)", None),
            Err(ParseError::MismatchedParentheses(_))
        ));
    }

    #[test]
    fn test_outer_one() {
        assert_eq!(find_outer_parentheses("(x==1)", None).unwrap(), vec![(0, 5)]);
    }

    #[test]
    fn test_outer_two() {
        assert_eq!(
            find_outer_parentheses("(x==1),(y==1)", None).unwrap(),
            vec![(0, 5), (7, 12)]
        );
    }

    #[test]
    fn test_outer_quoted_list_values() {
        assert_eq!(
            find_outer_parentheses(r#"(a==1),(_id=in=("xxx","yyy"))"#, None).unwrap(),
            vec![(0, 5), (7, 28)]
        );
    }

    #[test]
    fn test_outer_limit() {
        assert_eq!(
            find_outer_parentheses("(x==1),(y==1)", Some(1)).unwrap(),
            vec![(0, 5)]
        );
    }

    #[test]
    fn test_outer_containing_list() {
        assert_eq!(
            find_outer_parentheses("(y==2),x=in=(1,2,3)", None).unwrap(),
            vec![(0, 5)]
        );
    }

    #[test]
    fn test_outer_nested_list_rejected() {
        // List values are flat; a parenthesis inside one is malformed.
        assert!(matches!(
            find_outer_parentheses("(y==2),x=in=(1,(2),3)", None),
            Err(ParseError::MismatchedParentheses(_))
        ));
    }

    #[test]
    fn test_outer_at_beginning() {
        assert_eq!(
            find_outer_parentheses("(b==1,c==1);a==1", None).unwrap(),
            vec![(0, 10)]
        );
    }

    #[test]
    fn test_outer_at_end() {
        assert_eq!(
            find_outer_parentheses("a==1;(b==1,c==1)", None).unwrap(),
            vec![(5, 15)]
        );
    }

    #[test]
    fn test_outer_nested() {
        assert_eq!(
            find_outer_parentheses("((a==1,a==2),(b==1,b==2))", None).unwrap(),
            vec![(0, 24)]
        );
    }

    #[test]
    fn test_outer_nested_siblings() {
        assert_eq!(
            find_outer_parentheses("(a==1,a==2),(b==1,b==2)", None).unwrap(),
            vec![(0, 10), (12, 22)]
        );
    }
}
