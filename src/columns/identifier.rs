use super::{QUOTE_CHAR, QUOTE_NEIGHBOURS};

/// A token starting with one of these continues the previous formula token
const FORMULA_CONTINUATIONS: [char; 3] = ['(', '|', '\''];
const AS_WORD: &str = "as";

/// Display name of one column expression, quotes included
///
/// The last top-level token wins: `col alias`, `col as alias` and `t.col`
/// give `alias`, `alias` and `col`. Spaces inside a quoted identifier, a
/// string literal or parentheses do not separate tokens, and a token
/// starting with `(`, `|` or `'` is glued to the previous one so that
/// `round (a, 2)` stays whole.
pub fn resolve_identifier(expression: &str) -> String {
    let chars: Vec<char> = expression.trim().chars().collect();
    let mut identifier = String::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut in_literal = false;
    let mut depth: i32 = 0;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            QUOTE_CHAR if !in_literal => {
                // Kept so that the casing rule can tell quoted identifiers
                current.push(c);
                if !in_quote {
                    in_quote = i == 0 || QUOTE_NEIGHBOURS.contains(&chars[i - 1]);
                } else {
                    in_quote = !(i + 1 == chars.len() || QUOTE_NEIGHBOURS.contains(&chars[i + 1]));
                }
            }
            '\'' if !in_quote => {
                current.push(c);
                in_literal = !in_literal;
            }
            '(' | ')' => {
                current.push(c);
                if !in_quote && !in_literal {
                    depth += if c == '(' { 1 } else { -1 };
                }
            }
            // Qualifier of `schema.table.col`
            '.' if !in_quote && !in_literal && depth == 0 => current.clear(),
            ' ' if !in_quote && !in_literal && depth == 0 => {
                if !current.is_empty() {
                    accept_token(&mut identifier, &current);
                    current.clear();
                }
            }
            _ => current.push(c)
        }
    }
    if !current.is_empty() {
        accept_token(&mut identifier, &current);
    }
    identifier
}

fn accept_token(identifier: &mut String, token: &str) {
    if token.eq_ignore_ascii_case(AS_WORD) {
        return;
    }
    if token.starts_with(FORMULA_CONTINUATIONS) && !identifier.is_empty() {
        identifier.push(' ');
        identifier.push_str(token);
    } else {
        *identifier = token.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_aliased() {
        assert_eq!(resolve_identifier("a"), "a");
        assert_eq!(resolve_identifier("a b"), "b");
        assert_eq!(resolve_identifier("a AS b"), "b");
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(resolve_identifier("s.t.col"), "col");
        assert_eq!(resolve_identifier("\"tab le\".\"co l\""), "\"co l\"");
    }

    #[test]
    fn test_quoted_alias_keeps_spaces() {
        assert_eq!(resolve_identifier("\"c o l\" as \" a l i a s \""), "\" a l i a s \"");
    }

    #[test]
    fn test_formula_keeps_signature() {
        assert_eq!(resolve_identifier("avg(ss_quantity)"), "avg(ss_quantity)");
        assert_eq!(resolve_identifier("round(t.a, 2)"), "round(t.a, 2)");
        assert_eq!(resolve_identifier("round (a, 2)"), "round (a, 2)");
    }

    #[test]
    fn test_literal_does_not_move_depth() {
        assert_eq!(resolve_identifier("'(' as p"), "p");
        assert_eq!(resolve_identifier("':-)' smiley"), "smiley");
        assert_eq!(resolve_identifier("'a.b c'"), "'a.b c'");
    }

    #[test]
    fn test_concatenation_tail_is_glued() {
        assert_eq!(resolve_identifier("'a' || 'b'"), "'a' || 'b'");
        assert_eq!(resolve_identifier("a || b"), "b");
    }
}
