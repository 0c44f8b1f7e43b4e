//! Application logic for the tabulify-sql CLI.
//!
//! This module contains the command implementations separated from the
//! main entry point to enable testing.

mod convert;
mod helpers;
mod types;

pub use convert::convert_format;
pub use helpers::{create_output_options, effective_extractor_options, lex_input};
use rayon::prelude::*;
use tracing::debug;
pub use types::{ColumnsParams, CommandOutput, SplitParams};

use crate::{
    columns::{ColumnIdentifierExtractor, unique_column_names},
    config::Config,
    error::AppResult,
    lexer::{SqlLexer, StatementCategory, executable_statements},
    output::{QueryColumns, format_columns, format_statements}
};

/// Run the split command
pub fn run_split(params: SplitParams, config: &Config) -> AppResult<CommandOutput> {
    let lexer = SqlLexer::new(config.lexer_config());
    let mut statements = lex_input(&lexer, &params.script_path)?;
    if params.executable {
        statements = executable_statements(statements);
    }
    debug!(count = statements.len(), "script split");
    let opts = create_output_options(params.output_format, params.no_color, params.verbose);
    Ok(CommandOutput {
        exit_code: 0,
        stdout:    vec![format_statements(&statements, &opts)]
    })
}

/// Run the columns command
///
/// Queries are extracted in parallel, each extraction owns its state.
pub fn run_columns(params: ColumnsParams, config: &Config) -> AppResult<CommandOutput> {
    let lexer = SqlLexer::new(config.lexer_config());
    let statements = lex_input(&lexer, &params.script_path)?;
    let extractor = ColumnIdentifierExtractor::new(effective_extractor_options(
        config,
        params.function_name,
        params.preserve_case
    ));

    let candidates: Vec<_> = statements
        .iter()
        .filter(|s| s.category() == StatementCategory::Sql)
        .filter(|s| {
            let keep = params.strict || s.is_query();
            if !keep {
                debug!(line = s.start_line(), kind = %s.kind(), "statement skipped, not a query");
            }
            keep
        })
        .collect();

    let queries = candidates
        .par_iter()
        .map(|statement| -> AppResult<QueryColumns> {
            let columns = extractor.extract_statement(statement)?;
            let columns = if params.unique {
                unique_column_names(&columns)
            } else {
                columns
            };
            Ok(QueryColumns {
                start_line: statement.start_line(),
                columns
            })
        })
        .collect::<AppResult<Vec<QueryColumns>>>()?;

    let opts = create_output_options(params.output_format, params.no_color, false);
    Ok(CommandOutput {
        exit_code: 0,
        stdout:    vec![format_columns(&queries, &opts)]
    })
}
