//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.tabulify-sql.toml` in current directory
//! 4. `~/.config/tabulify-sql/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [lexer]
//! sql_new_line_terminators = [";", "/", ""]
//! psql_new_line_terminators = [".", "/", "$$;"]
//! sql_end_of_line_terminators = [";"]
//! psql_end_of_line_terminators = ["//", "$$;"]
//! comment_prefixes = ["--", "#"]
//! line_separator = "\n"
//!
//! [extractor]
//! lowercase_identifiers = true
//! function_name_as_identifier = false
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `TABULIFY_SQL_LOWERCASE_IDENTIFIERS` | Lower-case unquoted identifiers |
//! | `TABULIFY_SQL_FUNCTION_NAME_AS_IDENTIFIER` | Name formula columns after their function |
//! | `TABULIFY_SQL_LINE_SEPARATOR` | Separator used to join statement lines |

use std::{env, fs, path::PathBuf};

use indexmap::IndexSet;
use serde::Deserialize;

use crate::{
    columns::ExtractorOptions,
    error::{AppResult, config_error},
    lexer::LexerConfig
};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub lexer:     LexerSettings,
    #[serde(default)]
    pub extractor: ExtractorSettings
}

/// Lexer overrides, an absent key keeps the default
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LexerSettings {
    pub sql_new_line_terminators:     Option<IndexSet<String>>,
    pub psql_new_line_terminators:    Option<IndexSet<String>>,
    pub sql_end_of_line_terminators:  Option<IndexSet<String>>,
    pub psql_end_of_line_terminators: Option<IndexSet<String>>,
    pub comment_prefixes:             Option<IndexSet<String>>,
    pub line_separator:               Option<String>
}

/// Column identifier extractor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorSettings {
    #[serde(default = "default_true")]
    pub lowercase_identifiers:       bool,
    #[serde(default)]
    pub function_name_as_identifier: bool
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            lowercase_identifiers:       true,
            function_name_as_identifier: false
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.tabulify-sql.toml)
    /// 3. Config file in home directory (~/.config/tabulify-sql/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("tabulify-sql")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(".tabulify-sql.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Parse a TOML configuration text
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    fn from_file(path: &PathBuf) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    fn apply_env(&mut self) -> AppResult<()> {
        if let Ok(value) = env::var("TABULIFY_SQL_LOWERCASE_IDENTIFIERS") {
            self.extractor.lowercase_identifiers =
                parse_flag("TABULIFY_SQL_LOWERCASE_IDENTIFIERS", &value)?;
        }
        if let Ok(value) = env::var("TABULIFY_SQL_FUNCTION_NAME_AS_IDENTIFIER") {
            self.extractor.function_name_as_identifier =
                parse_flag("TABULIFY_SQL_FUNCTION_NAME_AS_IDENTIFIER", &value)?;
        }
        if let Ok(separator) = env::var("TABULIFY_SQL_LINE_SEPARATOR") {
            self.lexer.line_separator = Some(separator);
        }
        Ok(())
    }

    /// Lexer configuration with the overrides applied on the defaults
    pub fn lexer_config(&self) -> LexerConfig {
        let mut lexer = LexerConfig::default();
        let settings = &self.lexer;
        if let Some(set) = &settings.sql_new_line_terminators {
            lexer.sql_new_line_terminators = set.clone();
        }
        if let Some(set) = &settings.psql_new_line_terminators {
            lexer.psql_new_line_terminators = set.clone();
        }
        if let Some(set) = &settings.sql_end_of_line_terminators {
            lexer.sql_end_of_line_terminators = set.clone();
        }
        if let Some(set) = &settings.psql_end_of_line_terminators {
            lexer.psql_end_of_line_terminators = set.clone();
        }
        if let Some(set) = &settings.comment_prefixes {
            lexer.comment_prefixes = set.clone();
        }
        if let Some(separator) = &settings.line_separator {
            lexer.line_separator = separator.clone();
        }
        lexer
    }

    pub fn extractor_options(&self) -> ExtractorOptions {
        ExtractorOptions {
            lowercase_identifiers:       self.extractor.lowercase_identifiers,
            function_name_as_identifier: self.extractor.function_name_as_identifier
        }
    }
}

/// Parse a boolean flag value: true/false, 1/0, yes/no, on/off
pub fn parse_flag(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(config_error(format!(
            "Invalid value for {}: '{}' (expected true or false)",
            name, other
        )))
    }
}
