//! Line-oriented statement scanner.
//!
//! Reads one line at a time and accumulates it into the current statement
//! until a terminator of the statement's category is seen. The category is
//! decided once, from the first content line, and never revisited.

use std::{io::BufRead, iter::FusedIterator};

use tracing::debug;

use super::{
    kind::{Classifier, StatementCategory, StatementKind, is_jdbc_escape},
    types::{DOLLAR_QUOTE_TERMINATOR, LexerConfig, Statement, StatementBuilder}
};
use crate::error::{AppResult, stream_error};

const UTF8_BOM: char = '\u{feff}';

/// Active sub-grammar while a statement is accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    Start,
    Sql,
    Psql,
    Command,
    Comment
}

impl ScanMode {
    fn from_category(category: StatementCategory) -> Self {
        match category {
            StatementCategory::Sql => Self::Sql,
            StatementCategory::Psql => Self::Psql,
            StatementCategory::Command => Self::Command,
            StatementCategory::Comment => Self::Comment
        }
    }

    /// Category whose terminator sets apply in this mode
    fn terminated_category(self) -> Option<StatementCategory> {
        match self {
            Self::Sql => Some(StatementCategory::Sql),
            Self::Psql => Some(StatementCategory::Psql),
            Self::Start | Self::Command | Self::Comment => None
        }
    }
}

/// Lazy sequence of the statements of one script
///
/// Owns the reader: dropping the iterator, even before it is exhausted,
/// releases the underlying source. After the first error or the end of the
/// source the iterator only yields `None`.
pub struct Statements<'a, R> {
    reader:      R,
    config:      &'a LexerConfig,
    classifier:  &'a Classifier,
    line:        String,
    line_number: usize,
    done:        bool
}

impl<'a, R: BufRead> Statements<'a, R> {
    pub(crate) fn new(reader: R, config: &'a LexerConfig, classifier: &'a Classifier) -> Self {
        Self {
            reader,
            config,
            classifier,
            line: String::new(),
            line_number: 0,
            done: false
        }
    }

    /// Number of lines read so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line into the buffer, without its line ending
    fn read_line(&mut self) -> AppResult<bool> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| stream_error(self.line_number, e))?;
        if read == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        if self.line.ends_with('\n') {
            self.line.pop();
            if self.line.ends_with('\r') {
                self.line.pop();
            }
        }
        if self.line_number == 1 && self.line.starts_with(UTF8_BOM) {
            self.line.replace_range(..UTF8_BOM.len_utf8(), "");
        }
        Ok(true)
    }

    fn scan(&mut self) -> AppResult<Option<Statement>> {
        let config = self.config;
        let mut builder: Option<StatementBuilder> = None;
        let mut mode = ScanMode::Start;

        loop {
            if !self.read_line()? {
                return Ok(builder.map(StatementBuilder::build));
            }
            let line = self.line.as_str();
            let trimmed = line.trim();

            if builder.is_none() {
                // Blank lines and stray terminators only separate statements
                if trimmed.is_empty() || config.is_separator_line(trimmed) {
                    continue;
                }
                builder = Some(StatementBuilder::new(self.line_number));
            }
            let Some(current) = builder.as_mut() else {
                continue;
            };

            if let Some(category) = mode.terminated_category()
                && let Some(terminators) = config.new_line_terminators(category)
                && terminators.contains(trimmed)
            {
                // The dollar quote closes the body, only `;` is the separator
                if trimmed == DOLLAR_QUOTE_TERMINATOR {
                    current.push("$$");
                }
                return Ok(builder.map(StatementBuilder::build));
            }

            if current.kind().is_none() {
                if config.is_comment(trimmed) {
                    current.set_kind(StatementKind::Comment);
                    current.push(line);
                    return Ok(builder.map(StatementBuilder::build));
                }
                if is_jdbc_escape(trimmed) {
                    current.set_kind(StatementKind::Callable);
                    current.push(trimmed);
                    return Ok(builder.map(StatementBuilder::build));
                }
                let kind = self.classifier.classify(trimmed);
                current.set_kind(kind);
                mode = ScanMode::from_category(kind.category());
                debug!(line = self.line_number, %kind, "statement started");
                if matches!(mode, ScanMode::Command | ScanMode::Comment) {
                    let command = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
                    current.push(command);
                    return Ok(builder.map(StatementBuilder::build));
                }
            }

            if !trimmed.is_empty()
                && let Some(category) = mode.terminated_category()
                && let Some(terminators) = config.end_of_line_terminators(category)
                && let Some(terminator) = longest_suffix(terminators.iter(), trimmed)
            {
                current.push(strip_terminator(trimmed, terminator));
                return Ok(builder.map(StatementBuilder::build));
            }

            current.push_line(line, &config.line_separator);
        }
    }
}

impl<R: BufRead> Iterator for Statements<'_, R> {
    type Item = AppResult<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scan() {
            Ok(Some(statement)) => {
                debug!(
                    line = statement.start_line(),
                    category = %statement.category(),
                    "statement scanned"
                );
                Some(Ok(statement))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Statements<'_, R> {}

/// Longest non-empty terminator the line ends with
fn longest_suffix<'t>(
    terminators: impl Iterator<Item = &'t String>,
    trimmed: &str
) -> Option<&'t str> {
    terminators
        .map(String::as_str)
        .filter(|t| !t.is_empty() && trimmed.ends_with(t))
        .max_by_key(|t| t.len())
}

/// Remove the terminator from a trimmed line, keeping a closing dollar quote
fn strip_terminator<'l>(trimmed: &'l str, terminator: &str) -> &'l str {
    let cut = if terminator == DOLLAR_QUOTE_TERMINATOR {
        1
    } else {
        terminator.len()
    };
    trimmed[..trimmed.len() - cut].trim()
}
