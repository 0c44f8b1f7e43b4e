use indexmap::IndexSet;
use serde::Serialize;

use super::kind::{StatementCategory, StatementKind, starts_with_query_word};

/// Terminator ending a dollar-quoted body; only its `;` separates statements
pub const DOLLAR_QUOTE_TERMINATOR: &str = "$$;";

/// Terminator sets and text settings of the lexer
///
/// New-line terminators close a statement when a whole trimmed line equals
/// one of them. End-of-line terminators close it when a trimmed line ends
/// with one; the terminator is stripped from the statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerConfig {
    pub sql_new_line_terminators:     IndexSet<String>,
    pub psql_new_line_terminators:    IndexSet<String>,
    pub sql_end_of_line_terminators:  IndexSet<String>,
    pub psql_end_of_line_terminators: IndexSet<String>,
    pub comment_prefixes:             IndexSet<String>,
    pub line_separator:               String
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            // Oracle: `;`, `/` on its own line, or a blank line
            sql_new_line_terminators:     string_set(&[";", "/", ""]),
            // SQL*Plus `.`/`/`, Postgres `$$;`
            psql_new_line_terminators:    string_set(&[".", "/", DOLLAR_QUOTE_TERMINATOR]),
            sql_end_of_line_terminators:  string_set(&[";"]),
            // MySQL `DELIMITER //`, Postgres `$$;`
            psql_end_of_line_terminators: string_set(&["//", DOLLAR_QUOTE_TERMINATOR]),
            // `#` is the MySQL comment
            comment_prefixes:             string_set(&["--", "#"]),
            line_separator:               String::from("\n")
        }
    }
}

impl LexerConfig {
    /// Terminators matching a whole line for the category
    pub fn new_line_terminators(&self, category: StatementCategory) -> Option<&IndexSet<String>> {
        match category {
            StatementCategory::Sql => Some(&self.sql_new_line_terminators),
            StatementCategory::Psql => Some(&self.psql_new_line_terminators),
            StatementCategory::Command | StatementCategory::Comment => None
        }
    }

    /// Terminators matching the end of a line for the category
    pub fn end_of_line_terminators(
        &self,
        category: StatementCategory
    ) -> Option<&IndexSet<String>> {
        match category {
            StatementCategory::Sql => Some(&self.sql_end_of_line_terminators),
            StatementCategory::Psql => Some(&self.psql_end_of_line_terminators),
            StatementCategory::Command | StatementCategory::Comment => None
        }
    }

    /// Does the trimmed line start with a comment prefix
    pub fn is_comment(&self, trimmed: &str) -> bool {
        self.comment_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && trimmed.starts_with(prefix.as_str()))
    }

    /// Is the trimmed line a new-line terminator of any category
    pub fn is_separator_line(&self, trimmed: &str) -> bool {
        self.sql_new_line_terminators.contains(trimmed)
            || self.psql_new_line_terminators.contains(trimmed)
    }

    pub fn with_sql_new_line_terminators(mut self, terminators: &[&str]) -> Self {
        self.sql_new_line_terminators = string_set(terminators);
        self
    }

    pub fn with_psql_new_line_terminators(mut self, terminators: &[&str]) -> Self {
        self.psql_new_line_terminators = string_set(terminators);
        self
    }

    pub fn with_sql_end_of_line_terminators(mut self, terminators: &[&str]) -> Self {
        self.sql_end_of_line_terminators = string_set(terminators);
        self
    }

    pub fn with_psql_end_of_line_terminators(mut self, terminators: &[&str]) -> Self {
        self.psql_end_of_line_terminators = string_set(terminators);
        self
    }

    pub fn with_comment_prefixes(mut self, prefixes: &[&str]) -> Self {
        self.comment_prefixes = string_set(prefixes);
        self
    }

    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }
}

fn string_set(values: &[&str]) -> IndexSet<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// One statement of a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    kind:       StatementKind,
    text:       String,
    start_line: usize
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    pub fn category(&self) -> StatementCategory {
        self.kind.category()
    }

    /// Statement text without its terminator
    pub fn text(&self) -> &str {
        &self.text
    }

    /// One-based line number of the first line of the statement
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Everything but comments is sent to the database
    pub fn is_executable(&self) -> bool {
        self.category() != StatementCategory::Comment
    }

    /// SQL statement starting with `select` or `with`
    pub fn is_query(&self) -> bool {
        self.category() == StatementCategory::Sql && starts_with_query_word(&self.text)
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Mutable accumulator of the statement being scanned
#[derive(Debug)]
pub(crate) struct StatementBuilder {
    kind:       Option<StatementKind>,
    text:       String,
    start_line: usize
}

impl StatementBuilder {
    pub(crate) fn new(start_line: usize) -> Self {
        Self {
            kind: None,
            text: String::new(),
            start_line
        }
    }

    pub(crate) fn kind(&self) -> Option<StatementKind> {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: StatementKind) {
        self.kind = Some(kind);
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_line(&mut self, line: &str, separator: &str) {
        self.text.push_str(line);
        self.text.push_str(separator);
    }

    /// Freeze into a statement, dropping trailing line separators
    pub(crate) fn build(self) -> Statement {
        let mut text = self.text;
        text.truncate(text.trim_end().len());
        Statement {
            kind: self.kind.unwrap_or(StatementKind::Unknown),
            text,
            start_line: self.start_line
        }
    }
}
