//! Column identifiers of a query's select list.
//!
//! Finds the names of the columns a `select` or `with` query projects
//! without executing it or building a parse tree. Used to name the columns
//! of a target table created from a query.
//!
//! Extraction runs in three phases:
//!
//! 1. isolate the top-level select list ([`extract_select_list`])
//! 2. split it on top-level commas ([`split_column_expressions`])
//! 3. resolve the trailing identifier of each expression
//!
//! This is a heuristic: malformed SQL past the select list may give an
//! incomplete list rather than an error.
//!
//! # Example
//!
//! ```
//! use tabulify_sql::columns::extract_column_identifiers;
//!
//! let columns = extract_column_identifiers("select a, t.b as c, \"d e\" from t").unwrap();
//! let names: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
//! assert_eq!(names, ["a", "c", "d e"]);
//! ```

mod identifier;
mod select_list;
mod split;

use compact_str::{CompactString, format_compact};
use indexmap::IndexSet;
pub use identifier::resolve_identifier;
pub use select_list::{extract_select_list, flatten};
use smallvec::SmallVec;
pub use split::split_column_expressions;
use tracing::{debug, warn};

use crate::{
    error::{AppResult, statement_error, structural_input_error},
    lexer::{Statement, kind::starts_with_query_word}
};

/// Double quote delimiting identifiers
pub const QUOTE_CHAR: char = '"';

/// Neighbours of a double quote that opens or closes an identifier
const QUOTE_NEIGHBOURS: [char; 3] = [' ', ',', '.'];

/// Type alias for small column vectors (typically < 8 elements)
pub type ColumnVec = SmallVec<[CompactString; 8]>;

/// Casing and formula options of the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorOptions {
    /// Lower-case unquoted identifiers, as most engines fold them
    pub lowercase_identifiers:       bool,
    /// Name a formula column after its function: `avg(qty)` gives `avg`
    pub function_name_as_identifier: bool
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            lowercase_identifiers:       true,
            function_name_as_identifier: false
        }
    }
}

/// Select-list column identifier extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnIdentifierExtractor {
    options: ExtractorOptions
}

impl ColumnIdentifierExtractor {
    pub fn new(options: ExtractorOptions) -> Self {
        Self {
            options
        }
    }

    pub fn options(&self) -> ExtractorOptions {
        self.options
    }

    /// Identifiers of the columns projected by a query, in order
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty or does not start with
    /// `select` or `with`.
    pub fn extract(&self, query: &str) -> AppResult<ColumnVec> {
        check_query(query)?;
        let select_list = extract_select_list(query);
        let identifiers: ColumnVec = split_column_expressions(&select_list)
            .iter()
            .filter_map(|expression| self.finalize(resolve_identifier(expression)))
            .collect();
        debug!(count = identifiers.len(), "column identifiers extracted");
        Ok(identifiers)
    }

    /// Identifiers of a lexed statement, errors carry its start line
    ///
    /// # Errors
    ///
    /// Returns an error if the statement is not a query.
    pub fn extract_statement(&self, statement: &Statement) -> AppResult<ColumnVec> {
        if !statement.is_query() {
            return Err(statement_error(
                statement.start_line(),
                format!(
                    "a {} statement has no select list, only `select` and `with` queries do",
                    statement.kind()
                )
            ));
        }
        self.extract(statement.text())
    }

    fn finalize(&self, raw: String) -> Option<CompactString> {
        if raw.is_empty() {
            return None;
        }
        if raw.len() >= 2 && raw.starts_with(QUOTE_CHAR) && raw.ends_with(QUOTE_CHAR) {
            return Some(CompactString::from(&raw[1..raw.len() - 1]));
        }
        let mut identifier = if self.options.lowercase_identifiers {
            raw.to_lowercase()
        } else {
            raw
        };
        if self.options.function_name_as_identifier
            && let Some(open) = identifier.find('(')
            && identifier[open..].contains(')')
        {
            let function_name = identifier[..open].trim();
            if !function_name.is_empty() {
                identifier = function_name.to_string();
            }
        }
        Some(CompactString::from(identifier))
    }
}

/// Extract column identifiers with the default options
pub fn extract_column_identifiers(query: &str) -> AppResult<ColumnVec> {
    ColumnIdentifierExtractor::default().extract(query)
}

/// Reject text whose first word is not `select` or `with`
pub fn check_query(query: &str) -> AppResult<()> {
    if starts_with_query_word(query) {
        Ok(())
    } else {
        Err(structural_input_error(query))
    }
}

/// Make column names unique for a target table
///
/// A name already taken is suffixed with its zero-based position:
/// `[avg, avg]` becomes `[avg, avg-1]`.
pub fn unique_column_names(identifiers: &[CompactString]) -> ColumnVec {
    let mut taken: IndexSet<CompactString> = IndexSet::with_capacity(identifiers.len());
    let mut names = ColumnVec::new();
    for (position, identifier) in identifiers.iter().enumerate() {
        let mut name = identifier.clone();
        if taken.contains(&name) {
            name = format_compact!("{}-{}", identifier, position);
            warn!(column = %identifier, renamed = %name, "column name specified more than once");
        }
        taken.insert(name.clone());
        names.push(name);
    }
    names
}
