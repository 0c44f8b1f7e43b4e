//! Database script lexer.
//!
//! Splits a script that mixes plain SQL, procedural blocks, comments and
//! client commands into executable statements, without a SQL grammar.
//! Oracle SQL*Plus (`/`, `.`), Postgres (`$$;`) and MySQL `DELIMITER //`
//! conventions are recognized at the same time.
//!
//! # Example
//!
//! ```
//! use tabulify_sql::lexer::{SqlLexer, StatementCategory};
//!
//! let lexer = SqlLexer::default();
//! let statements: Vec<_> = lexer
//!     .parse_str("-- load\ninsert into t values (1);\n\nselect * from t;\n")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(statements.len(), 3);
//! assert_eq!(statements[0].category(), StatementCategory::Comment);
//! assert_eq!(statements[2].text(), "select * from t");
//! assert_eq!(statements[2].start_line(), 4);
//! ```

pub mod kind;
mod tokenizer;
mod types;

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path
};

pub use kind::{Classifier, StatementCategory, StatementKind};
pub use tokenizer::Statements;
pub use types::{DOLLAR_QUOTE_TERMINATOR, LexerConfig, Statement};

use crate::error::{AppResult, file_read_error};

/// Statement lexer: keyword classifier plus terminator configuration
#[derive(Debug, Clone, Default)]
pub struct SqlLexer {
    config:     LexerConfig,
    classifier: Classifier
}

impl SqlLexer {
    pub fn new(config: LexerConfig) -> Self {
        Self {
            config,
            classifier: Classifier::default()
        }
    }

    /// Replace the keyword table used to classify statements
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Statements of a buffered source
    pub fn statements<R: BufRead>(&self, reader: R) -> Statements<'_, R> {
        Statements::new(reader, &self.config, &self.classifier)
    }

    /// Statements of an in-memory script
    pub fn parse_str<'a>(&'a self, script: &'a str) -> Statements<'a, &'a [u8]> {
        self.statements(script.as_bytes())
    }

    /// Statements of a byte stream read as UTF-8 text
    pub fn parse_reader<R: Read>(&self, reader: R) -> Statements<'_, BufReader<R>> {
        self.statements(BufReader::new(reader))
    }

    /// Statements of a UTF-8 script file
    ///
    /// The file stays open until the returned iterator is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn parse_path(&self, path: &Path) -> AppResult<Statements<'_, BufReader<File>>> {
        let file = File::open(path).map_err(|e| file_read_error(&path.display().to_string(), e))?;
        Ok(self.parse_reader(file))
    }
}

/// Split a script with the default lexer
pub fn parse_script(script: &str) -> AppResult<Vec<Statement>> {
    SqlLexer::default().parse_str(script).collect()
}

/// Statements that are sent to the database, comments removed
pub fn executable_statements(
    statements: impl IntoIterator<Item = Statement>
) -> Vec<Statement> {
    statements
        .into_iter()
        .filter(Statement::is_executable)
        .collect()
}
