use super::{QUOTE_CHAR, QUOTE_NEIGHBOURS};

/// Split a select list on its top-level commas
///
/// Commas inside a quoted identifier (`"a, b"`), a string literal
/// (`'x, y'`) or parentheses (`round(a, 2)`, `rank() over (partition by a, b)`)
/// do not split. Expressions are trimmed and empty ones dropped.
pub fn split_column_expressions(select_list: &str) -> Vec<String> {
    let chars: Vec<char> = select_list.trim().chars().collect();
    let mut expressions = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut in_literal = false;
    let mut depth: i32 = 0;

    for (i, &c) in chars.iter().enumerate() {
        match c {
            QUOTE_CHAR if !in_literal => {
                if !in_quote {
                    in_quote = i == 0 || QUOTE_NEIGHBOURS.contains(&chars[i - 1]);
                } else {
                    in_quote = !(i + 1 == chars.len() || QUOTE_NEIGHBOURS.contains(&chars[i + 1]));
                }
            }
            '\'' if !in_quote => in_literal = !in_literal,
            '(' if !in_quote && !in_literal => depth += 1,
            ')' if !in_quote && !in_literal => depth -= 1,
            ',' if !in_quote && !in_literal && depth == 0 => {
                push_expression(&mut expressions, &current);
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    push_expression(&mut expressions, &current);
    expressions
}

fn push_expression(expressions: &mut Vec<String>, expression: &str) {
    let trimmed = expression.trim();
    if !trimmed.is_empty() {
        expressions.push(trimmed.to_string());
    }
}
