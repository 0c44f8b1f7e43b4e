//! Statement kind classification.
//!
//! The classifier looks at the leading words of the first content line of a
//! statement and decides which scan mode the tokenizer uses until the
//! statement ends:
//!
//! - [`StatementCategory::Sql`] - ends on `;`, a lone `/` or a blank line
//! - [`StatementCategory::Psql`] - procedural block, blank lines and `;` are
//!   content, ends on a lone `.`, `/`, `$$;` or a trailing `//`, `$$;`
//! - [`StatementCategory::Command`] - client command, always one line
//!
//! Unknown leading words never fail: they fall back to
//! [`StatementKind::Unknown`], which scans as SQL.

use std::collections::HashMap;

use serde::Serialize;

/// Scan category of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementCategory {
    /// Plain SQL statement
    Sql,
    /// Procedural block (PL/SQL, PL/pgSQL, stored program bodies)
    Psql,
    /// Client-side or session command, one line
    Command,
    /// Single-line comment
    Comment
}

impl std::fmt::Display for StatementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sql => write!(f, "SQL"),
            Self::Psql => write!(f, "PSQL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Comment => write!(f, "COMMENT")
        }
    }
}

/// What a statement was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StatementKind {
    /// `select`, `with`, `values`, `show`, `explain`
    Query,
    /// `insert`, `update`, `delete`, `merge`, `call`, ...
    Dml,
    /// `create`, `alter`, `drop`, `truncate`, `grant`, ...
    Ddl,
    /// `commit`, `rollback`, `savepoint`, `begin transaction`, ...
    Transaction,
    /// Session statement executed by the server (`set`, `alter session`)
    Session,
    /// Anonymous procedural block (`declare`, `begin`, `do`)
    Block,
    /// `create function/procedure/trigger/package/type/library`
    StoredProgram,
    /// JDBC escape wrapped in `{ ... }`
    Callable,
    /// Client command (`prompt`, `spool`, `delimiter`, `\connect`, ...)
    Command,
    /// Single-line comment
    Comment,
    /// Leading words not found in the keyword table
    Unknown
}

impl StatementKind {
    /// Category driving the scan mode of this kind
    pub fn category(self) -> StatementCategory {
        match self {
            Self::Block | Self::StoredProgram => StatementCategory::Psql,
            Self::Command => StatementCategory::Command,
            Self::Comment => StatementCategory::Comment,
            Self::Query
            | Self::Dml
            | Self::Ddl
            | Self::Transaction
            | Self::Session
            | Self::Callable
            | Self::Unknown => StatementCategory::Sql
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Query => "query",
            Self::Dml => "dml",
            Self::Ddl => "ddl",
            Self::Transaction => "transaction",
            Self::Session => "session",
            Self::Block => "block",
            Self::StoredProgram => "stored program",
            Self::Callable => "callable",
            Self::Command => "command",
            Self::Comment => "comment",
            Self::Unknown => "unknown"
        };
        f.write_str(label)
    }
}

/// Longest keyword phrase, in words, the classifier compares
const MAX_PHRASE_WORDS: usize = 5;

/// Characters of JDBC escapes (`{? = call ...}`) dropped before classifying
const ESCAPE_MARKERS: [char; 4] = ['{', '?', '}', '='];

const QUERY_WORDS: &[&str] = &["SELECT", "WITH", "VALUES", "SHOW", "EXPLAIN", "TABLE"];

const DML_WORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "MERGE", "UPSERT", "REPLACE", "CALL", "COPY", "LOCK", "LOAD"
];

const DDL_WORDS: &[&str] = &[
    "CREATE",
    "ALTER",
    "DROP",
    "TRUNCATE",
    "RENAME",
    "COMMENT",
    "GRANT",
    "REVOKE",
    "ANALYZE",
    "AUDIT",
    "NOAUDIT",
    "ASSOCIATE",
    "DISASSOCIATE",
    "FLASHBACK",
    "PURGE",
    "VACUUM",
    "REINDEX",
    "ATTACH",
    "DETACH",
    "PRAGMA"
];

const TRANSACTION_WORDS: &[&str] = &[
    "COMMIT",
    "ROLLBACK",
    "SAVEPOINT",
    "RELEASE",
    "START TRANSACTION",
    "BEGIN TRANSACTION",
    "BEGIN WORK",
    "BEGIN TRAN",
    "BEGIN DEFERRED",
    "BEGIN IMMEDIATE",
    "BEGIN EXCLUSIVE",
    "END TRANSACTION"
];

const SESSION_WORDS: &[&str] = &["SET", "RESET", "ALTER SESSION", "ALTER SYSTEM"];

const BLOCK_WORDS: &[&str] = &["DECLARE", "BEGIN", "DO"];

const STORED_PROGRAM_OBJECTS: &[&str] = &[
    "FUNCTION",
    "PROCEDURE",
    "TRIGGER",
    "PACKAGE",
    "PACKAGE BODY",
    "TYPE BODY",
    "LIBRARY"
];

const STORED_PROGRAM_PREFIXES: &[&str] = &[
    "CREATE",
    "CREATE OR REPLACE",
    "CREATE EDITIONABLE",
    "CREATE OR REPLACE EDITIONABLE",
    "CREATE NONEDITIONABLE",
    "CREATE OR REPLACE NONEDITIONABLE"
];

const COMMAND_WORDS: &[&str] = &[
    "PROMPT",
    "SPOOL",
    "DELIMITER",
    "WHENEVER",
    "DEFINE",
    "UNDEFINE",
    "VARIABLE",
    "VAR",
    "PRINT",
    "EXEC",
    "CONNECT",
    "CONN",
    "DISCONNECT",
    "EXIT",
    "QUIT",
    "DESCRIBE",
    "DESC",
    "USE",
    "SOURCE",
    "REM",
    "REMARK",
    "PAUSE",
    "HOST",
    "TIMING",
    "GO",
    "SET SERVEROUTPUT",
    "SET ECHO",
    "SET FEEDBACK",
    "SET HEADING",
    "SET LINESIZE",
    "SET PAGESIZE",
    "SET TERMOUT",
    "SET VERIFY",
    "SET DEFINE",
    "SET TIMING"
];

/// Keyword-table driven statement classifier
///
/// The table maps upper-cased phrases of one to [`MAX_PHRASE_WORDS`] leading
/// words to a kind; the longest matching phrase wins, so `CREATE FUNCTION`
/// overrides `CREATE` and `SET SERVEROUTPUT` overrides `SET`.
#[derive(Debug, Clone)]
pub struct Classifier {
    phrases: HashMap<String, StatementKind>
}

impl Default for Classifier {
    fn default() -> Self {
        let mut classifier = Self {
            phrases: HashMap::new()
        };
        let tables = [
            (QUERY_WORDS, StatementKind::Query),
            (DML_WORDS, StatementKind::Dml),
            (DDL_WORDS, StatementKind::Ddl),
            (TRANSACTION_WORDS, StatementKind::Transaction),
            (SESSION_WORDS, StatementKind::Session),
            (BLOCK_WORDS, StatementKind::Block),
            (COMMAND_WORDS, StatementKind::Command)
        ];
        for (phrases, kind) in tables {
            for phrase in phrases {
                classifier.register(phrase, kind);
            }
        }
        for prefix in STORED_PROGRAM_PREFIXES {
            for object in STORED_PROGRAM_OBJECTS {
                classifier.register(&format!("{} {}", prefix, object), StatementKind::StoredProgram);
            }
        }
        classifier
    }
}

impl Classifier {
    /// Classifier without any keyword, everything is [`StatementKind::Unknown`]
    pub fn empty() -> Self {
        Self {
            phrases: HashMap::new()
        }
    }

    /// Map a phrase of leading words to a kind, replacing any previous entry
    ///
    /// Phrases longer than five words are truncated to their first five.
    pub fn register(&mut self, phrase: &str, kind: StatementKind) -> &mut Self {
        let key = phrase
            .split_whitespace()
            .take(MAX_PHRASE_WORDS)
            .map(str::to_uppercase)
            .collect::<Vec<_>>()
            .join(" ");
        if !key.is_empty() {
            self.phrases.insert(key, kind);
        }
        self
    }

    /// Classify a line by its leading words
    pub fn classify(&self, line: &str) -> StatementKind {
        let words = leading_words(line);
        if words.is_empty() {
            return StatementKind::Unknown;
        }
        // `BEGIN;` on its own is a transaction start, not a block opener
        if words.len() == 1 && words[0] == "BEGIN" && line.trim_end().ends_with(';') {
            return StatementKind::Transaction;
        }
        if words[0].starts_with(['\\', '@', '!']) {
            return StatementKind::Command;
        }
        let longest = words.len().min(MAX_PHRASE_WORDS);
        (1..=longest)
            .rev()
            .find_map(|n| self.phrases.get(&words[..n].join(" ")).copied())
            .unwrap_or(StatementKind::Unknown)
    }
}

/// Upper-cased leading words of a line, without JDBC escape markers
///
/// Only the markers at the very start are dropped and a word stops at the
/// first character that cannot be part of a keyword, so `begin;`, `select*`
/// and `exec(` give `BEGIN`, `SELECT` and `EXEC`. Psql meta commands
/// (`\connect`) and SQL*Plus script calls (`@file`) keep their marker.
pub fn leading_words(line: &str) -> Vec<String> {
    let stripped =
        line.trim_start_matches(|c: char| c.is_whitespace() || ESCAPE_MARKERS.contains(&c));
    let mut words = Vec::new();
    for raw in stripped.split_whitespace().take(MAX_PHRASE_WORDS) {
        let word: String = raw
            .char_indices()
            .take_while(|(i, c)| {
                c.is_alphanumeric() || *c == '_' || (*i == 0 && matches!(c, '\\' | '@' | '!'))
            })
            .map(|(_, c)| c.to_ascii_uppercase())
            .collect();
        if word.is_empty() {
            break;
        }
        let complete = word.chars().count() == raw.chars().count();
        words.push(word);
        if !complete {
            break;
        }
    }
    words
}

/// Does the text start with the word `select` or `with`
///
/// The first word ends at whitespace, `(` or `*`: `select*from t` is a query,
/// `select1 from t` is not.
pub fn starts_with_query_word(text: &str) -> bool {
    let first_word = text
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(' || c == '*')
        .next()
        .unwrap_or_default();
    first_word.eq_ignore_ascii_case("select") || first_word.eq_ignore_ascii_case("with")
}

/// Is the trimmed line a JDBC escape such as `{call proc(?)}`
pub fn is_jdbc_escape(trimmed: &str) -> bool {
    let body = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
    body.len() >= 2 && body.starts_with('{') && body.ends_with('}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_words_strip_escape_markers() {
        assert_eq!(leading_words("{? = call proc(?)}"), vec!["CALL", "PROC"]);
        assert_eq!(leading_words("  } = select 1"), vec!["SELECT", "1"]);
    }

    #[test]
    fn test_leading_words_stop_at_punctuation() {
        assert_eq!(leading_words("begin;"), vec!["BEGIN"]);
        assert_eq!(leading_words("select*from t"), vec!["SELECT"]);
        assert_eq!(leading_words("create table t(a int)"), vec!["CREATE", "TABLE", "T"]);
    }

    #[test]
    fn test_leading_words_keep_meta_prefixes() {
        assert_eq!(leading_words("\\connect db"), vec!["\\CONNECT", "DB"]);
        assert_eq!(leading_words("@script.sql"), vec!["@SCRIPT"]);
    }

    #[test]
    fn test_register_normalizes_phrase() {
        let mut classifier = Classifier::empty();
        classifier.register("  upsert   into ", StatementKind::Dml);
        assert_eq!(classifier.classify("UPSERT INTO t"), StatementKind::Dml);
        assert_eq!(classifier.classify("upsert t"), StatementKind::Unknown);
    }

    #[test]
    fn test_query_word_is_whole_word() {
        assert!(starts_with_query_word("  SELECT 1"));
        assert!(starts_with_query_word("select*from t"));
        assert!(starts_with_query_word("with(x) as"));
        assert!(!starts_with_query_word("select1 from t"));
        assert!(!starts_with_query_word("selected from t"));
        assert!(!starts_with_query_word("(select 1)"));
        assert!(!starts_with_query_word(""));
    }

    #[test]
    fn test_jdbc_escape_detection() {
        assert!(is_jdbc_escape("{call p(?)}"));
        assert!(is_jdbc_escape("{call p(?)};"));
        assert!(!is_jdbc_escape("{call p(?)"));
        assert!(!is_jdbc_escape("{"));
    }
}
