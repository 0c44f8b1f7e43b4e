//! Application types for CLI commands.
//!
//! Parameters handed from the parsed command line to the command
//! implementations, and the output they produce.

use crate::cli::Format;

/// Parameters for the split command.
///
/// # Example
///
/// ```
/// use tabulify_sql::{app::SplitParams, cli::Format};
///
/// let params = SplitParams {
///     script_path:   "script.sql".to_string(),
///     output_format: Format::Text,
///     executable:    false,
///     no_color:      true,
///     verbose:       false
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SplitParams {
    /// Path to the script or "-" for stdin input.
    pub script_path:   String,
    /// Output format for the listing.
    pub output_format: Format,
    /// Leave comments out of the listing.
    pub executable:    bool,
    /// Disable colored terminal output.
    pub no_color:      bool,
    /// Show kind and start line of each statement.
    pub verbose:       bool
}

/// Parameters for the columns command.
#[derive(Debug, Clone)]
pub struct ColumnsParams {
    /// Path to the script or "-" for stdin input.
    pub script_path:   String,
    /// Output format for the column lists.
    pub output_format: Format,
    /// Name formula columns after their function.
    pub function_name: bool,
    /// Keep the case of unquoted identifiers.
    pub preserve_case: bool,
    /// Suffix duplicated names with their position.
    pub unique:        bool,
    /// Fail on SQL statements that are not queries.
    pub strict:        bool,
    /// Disable colored terminal output.
    pub no_color:      bool
}

/// Output from CLI command execution.
///
/// # Example
///
/// ```
/// use tabulify_sql::app::CommandOutput;
///
/// let output = CommandOutput {
///     exit_code: 0,
///     stdout:    vec!["Statement #1 (SQL):".to_string()]
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code for the process.
    pub exit_code: i32,
    /// Lines to print to stdout.
    pub stdout:    Vec<String>
}
