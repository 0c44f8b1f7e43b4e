//! Helper functions for CLI operations.
//!
//! Reading scripts from a file or stdin, and merging command-line flags
//! with the loaded configuration.

use std::{io, path::Path};

use super::convert::convert_format;
use crate::{
    cli::Format,
    columns::ExtractorOptions,
    config::Config,
    error::AppResult,
    lexer::{SqlLexer, Statement},
    output::OutputOptions
};

/// Lexes a script from a file or stdin.
///
/// The path "-" reads standard input. The file is streamed line by line
/// and closed once the last statement is read or on the first error.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn lex_input(lexer: &SqlLexer, path: &str) -> AppResult<Vec<Statement>> {
    if path == "-" {
        lexer.parse_reader(io::stdin().lock()).collect()
    } else {
        lexer.parse_path(Path::new(path))?.collect()
    }
}

/// Creates output options from command-line flags.
pub fn create_output_options(format: Format, no_color: bool, verbose: bool) -> OutputOptions {
    OutputOptions {
        format: convert_format(format),
        colored: !no_color,
        verbose
    }
}

/// Extractor options of the configuration, turned on or off by flags.
///
/// A flag only ever overrides the configuration in the direction it names.
pub fn effective_extractor_options(
    config: &Config,
    function_name: bool,
    preserve_case: bool
) -> ExtractorOptions {
    let mut options = config.extractor_options();
    if function_name {
        options.function_name_as_identifier = true;
    }
    if preserve_case {
        options.lowercase_identifiers = false;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_output_options_no_color() {
        let opts = create_output_options(Format::Text, true, false);
        assert!(!opts.colored);
        assert!(!opts.verbose);
    }

    #[test]
    fn test_effective_options_default() {
        let options = effective_extractor_options(&Config::default(), false, false);
        assert_eq!(options, ExtractorOptions::default());
    }

    #[test]
    fn test_effective_options_flags() {
        let options = effective_extractor_options(&Config::default(), true, true);
        assert!(options.function_name_as_identifier);
        assert!(!options.lowercase_identifiers);
    }

    #[test]
    fn test_lex_input_missing_file() {
        assert!(lex_input(&SqlLexer::default(), "/nonexistent/script.sql").is_err());
    }
}
