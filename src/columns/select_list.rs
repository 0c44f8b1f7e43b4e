//! Isolation of the top-level select list.
//!
//! The query is flattened on one line and walked space-delimited token by
//! token. Before the top `select` is found, parentheses only move the depth
//! so that a `select` of a leading `with` block is not taken for the main
//! one. Inside the select list, nested `select`s are counted and each nested
//! `from` consumes one of them; the first `from` with no nested `select`
//! pending and no parenthesis open ends the list. Parentheses and keywords
//! inside string literals or quoted identifiers are ignored.

use std::sync::LazyLock;

use regex::Regex;

use super::QUOTE_CHAR;

/// Tabs and line breaks, replaced by a single space
static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\r\n]+").expect("valid regex"));

const SELECT_WORD: &str = "select";
const FROM_WORD: &str = "from";

/// Query text on one line, trimmed
pub fn flatten(query: &str) -> String {
    LINE_BREAKS.replace_all(query, " ").trim().to_string()
}

/// Text between the top-level `select` and its `from`
///
/// A query without `from` (`select 1`) returns everything after `select`.
pub fn extract_select_list(query: &str) -> String {
    let flat = flatten(query);
    let mut list = String::new();
    let mut entered_select = false;
    let mut depth: i32 = 0;
    let mut intra_select_count: usize = 0;
    let mut quotes = QuoteState::default();

    for token in flat.split_inclusive(' ') {
        if !entered_select {
            if !quotes.is_open()
                && is_keyword(token, SELECT_WORD)
                && depth == 0
                && !token.starts_with('(')
            {
                entered_select = true;
            } else {
                depth += quotes.paren_balance(token);
            }
            continue;
        }
        // `from(select` and `count(*)` carry two tokens
        let (head, tail) = match token.find('(') {
            Some(index) => token.split_at(index),
            None => (token, "")
        };
        for sub_token in [head, tail] {
            if sub_token.is_empty() {
                continue;
            }
            // Quoted text is never a keyword
            if !quotes.is_open() {
                if is_keyword(sub_token, SELECT_WORD) {
                    intra_select_count += 1;
                } else if is_keyword(sub_token, FROM_WORD) {
                    if intra_select_count == 0 && depth == 0 {
                        return list;
                    }
                    intra_select_count = intra_select_count.saturating_sub(1);
                }
            }
            list.push_str(sub_token);
            depth += quotes.paren_balance(sub_token);
        }
    }
    list
}

/// Is the token the keyword, ignoring case, enclosing parentheses and spaces
fn is_keyword(token: &str, keyword: &str) -> bool {
    token
        .trim()
        .trim_start_matches('(')
        .trim_end_matches([')', ',', ';'])
        .eq_ignore_ascii_case(keyword)
}

/// Quote state carried from one token of the flattened query to the next
#[derive(Debug, Default)]
struct QuoteState {
    in_literal:    bool,
    in_identifier: bool
}

impl QuoteState {
    fn is_open(&self) -> bool {
        self.in_literal || self.in_identifier
    }

    /// Parenthesis balance of a token, counting only unquoted parentheses
    fn paren_balance(&mut self, token: &str) -> i32 {
        let mut balance = 0;
        for c in token.chars() {
            match c {
                '\'' if !self.in_identifier => self.in_literal = !self.in_literal,
                QUOTE_CHAR if !self.in_literal => self.in_identifier = !self.in_identifier,
                '(' if !self.is_open() => balance += 1,
                ')' if !self.is_open() => balance -= 1,
                _ => {}
            }
        }
        balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_replaces_breaks() {
        assert_eq!(flatten("select a,\n\tb\r\nfrom t\n"), "select a, b from t");
    }

    #[test]
    fn test_keyword_matching() {
        assert!(is_keyword("(select ", "select"));
        assert!(is_keyword("FROM ", "from"));
        assert!(!is_keyword("selected_at ", "select"));
        assert!(!is_keyword("from_date", "from"));
    }

    #[test]
    fn test_select_list_simple() {
        assert_eq!(extract_select_list("select a, b from t").trim(), "a, b");
    }

    #[test]
    fn test_select_list_without_from() {
        assert_eq!(extract_select_list("select 1").trim(), "1");
    }

    #[test]
    fn test_select_list_after_with_block() {
        let query = "with x as (select a from t) select b, c from x";
        assert_eq!(extract_select_list(query).trim(), "b, c");
    }

    #[test]
    fn test_select_list_nested_subquery() {
        let query = "select (select max(a) from u) as m, b from t";
        assert_eq!(
            extract_select_list(query).trim(),
            "(select max(a) from u) as m, b"
        );
    }

    #[test]
    fn test_select_list_from_inside_function() {
        let query = "select extract(year from d) as y from t";
        assert_eq!(extract_select_list(query).trim(), "extract(year from d) as y");
    }

    #[test]
    fn test_paren_balance_skips_quotes() {
        let mut quotes = QuoteState::default();
        assert_eq!(quotes.paren_balance("'(' "), 0);
        assert_eq!(quotes.paren_balance("\"a(b\", "), 0);
        assert_eq!(quotes.paren_balance("'it''s' (x "), 1);
        assert!(!quotes.is_open());
    }

    #[test]
    fn test_select_list_paren_in_literal() {
        assert_eq!(extract_select_list("select '(' as p, b from t").trim(), "'(' as p, b");
        assert_eq!(extract_select_list("select \"a(b\", c from t").trim(), "\"a(b\", c");
    }

    #[test]
    fn test_select_list_keywords_in_literal() {
        let query = "select 'select x from y' as q, b from t";
        assert_eq!(extract_select_list(query).trim(), "'select x from y' as q, b");
    }

    #[test]
    fn test_select_list_column_named_like_keyword() {
        let query = "select selected_at, from_date from t";
        assert_eq!(extract_select_list(query).trim(), "selected_at, from_date");
    }
}
