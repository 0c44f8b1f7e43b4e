//! # Tabulify SQL
//!
//! Split database scripts into statements and extract the column names of
//! queries.
//!
//! `tabulify-sql` reads scripts that mix plain SQL, procedural blocks
//! (PL/SQL, PL/pgSQL, MySQL `DELIMITER` blocks), comments and client
//! commands, and cuts them into the statements a database driver can run
//! one at a time. For `select` and `with` queries it also lists the column
//! identifiers they project, which is what a data transfer needs to create
//! the target table.
//!
//! # Quick Start
//!
//! ```bash
//! # List the statements of a script
//! tabulify-sql split migration.sql
//!
//! # Only what is sent to the database, as JSON
//! tabulify-sql split migration.sql --executable -f json
//!
//! # Column names of every query, formula columns named after the function
//! tabulify-sql columns report.sql --function-name --unique
//!
//! # Stream a script from stdin
//! cat script.sql | tabulify-sql columns -
//! ```
//!
//! # Statement Termination
//!
//! | Category | Whole-line terminators | End-of-line terminators |
//! |----------|------------------------|-------------------------|
//! | SQL | `;`, `/`, blank line | `;` |
//! | PSQL | `.`, `/`, `$$;` | `//`, `$$;` |
//! | COMMAND | one line | one line |
//! | COMMENT | one line (`--`, `#`) | one line |
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`TABULIFY_SQL_LOWERCASE_IDENTIFIERS`, ...)
//! 3. `.tabulify-sql.toml` in current directory
//! 4. `~/.config/tabulify-sql/config.toml`
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - `1` - Error (unreadable script, invalid configuration, `--strict`
//!   failure)
//!
//! # Logging
//!
//! Logs are written to stderr. `--verbose` enables debug logs of the
//! lexer and extractor, `RUST_LOG` overrides the filter.

use std::process;

use clap::Parser;
use tabulify_sql::{
    app::{ColumnsParams, SplitParams, run_columns, run_split},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult,
    logging::init_tracing
};

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> AppResult<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    let output = match cli.command {
        Commands::Split {
            script,
            output_format,
            executable,
            no_color
        } => run_split(
            SplitParams {
                script_path: script.display().to_string(),
                output_format,
                executable,
                no_color,
                verbose: cli.verbose
            },
            &config
        )?,
        Commands::Columns {
            script,
            output_format,
            function_name,
            preserve_case,
            unique,
            strict,
            no_color
        } => run_columns(
            ColumnsParams {
                script_path: script.display().to_string(),
                output_format,
                function_name,
                preserve_case,
                unique,
                strict,
                no_color
            },
            &config
        )?
    };

    for line in &output.stdout {
        println!("{}", line);
    }
    Ok(output.exit_code)
}
