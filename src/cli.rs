use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Tabulify SQL - split database scripts and extract query column names
#[derive(Parser, Debug)]
#[command(name = "tabulify-sql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log lexer and extractor decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a script into statements
    Split {
        /// Path to SQL script file (use - for stdin)
        script: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// List only statements sent to the database (no comments)
        #[arg(long)]
        executable: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// Extract the column identifiers of every query of a script
    Columns {
        /// Path to SQL script file (use - for stdin)
        script: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Name formula columns after their function (avg(x) -> avg)
        #[arg(long)]
        function_name: bool,

        /// Keep the case of unquoted identifiers
        #[arg(long)]
        preserve_case: bool,

        /// Make duplicated names unique (avg, avg-1)
        #[arg(long)]
        unique: bool,

        /// Fail on SQL statements that are not queries instead of skipping them
        #[arg(long)]
        strict: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
