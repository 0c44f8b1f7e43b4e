use colored::Colorize;
use serde::Serialize;

use crate::{
    columns::ColumnVec,
    lexer::{Statement, StatementCategory}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Two-column projection of a statement for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRecord {
    pub category: StatementCategory,
    pub text:     String
}

impl From<&Statement> for StatementRecord {
    fn from(statement: &Statement) -> Self {
        Self {
            category: statement.category(),
            text:     statement.text().to_string()
        }
    }
}

/// Column identifiers found for one query of a script
#[derive(Debug, Clone, Serialize)]
pub struct QueryColumns {
    pub start_line: usize,
    pub columns:    ColumnVec
}

/// Format a statement listing based on output options
pub fn format_statements(statements: &[Statement], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => {
            let records: Vec<StatementRecord> = statements.iter().map(Into::into).collect();
            serde_json::to_string_pretty(&records).unwrap_or_default()
        }
        OutputFormat::Yaml => {
            let records: Vec<StatementRecord> = statements.iter().map(Into::into).collect();
            serde_yaml::to_string(&records).unwrap_or_default()
        }
        OutputFormat::Text => format_text_statements(statements, opts)
    }
}

/// Format the column identifiers of queries based on output options
pub fn format_columns(queries: &[QueryColumns], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(queries).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(queries).unwrap_or_default(),
        OutputFormat::Text => {
            let mut output = String::new();
            for query in queries {
                let header = format!("Query at line {}:", query.start_line);
                if opts.colored {
                    output.push_str(&header.cyan().bold().to_string());
                } else {
                    output.push_str(&header);
                }
                output.push('\n');
                for column in &query.columns {
                    output.push_str(&format!("  {}\n", column));
                }
            }
            output
        }
    }
}

fn format_text_statements(statements: &[Statement], opts: &OutputOptions) -> String {
    let mut output = String::new();

    for (i, statement) in statements.iter().enumerate() {
        let header = if opts.verbose {
            format!(
                "Statement #{} ({}, {}) at line {}:",
                i + 1,
                statement.category(),
                statement.kind(),
                statement.start_line()
            )
        } else {
            format!("Statement #{} ({}):", i + 1, statement.category())
        };
        if opts.colored {
            let colored_header = match statement.category() {
                StatementCategory::Comment => header.dimmed(),
                StatementCategory::Command => header.yellow().bold(),
                StatementCategory::Psql => header.magenta().bold(),
                StatementCategory::Sql => header.cyan().bold()
            };
            output.push_str(&colored_header.to_string());
        } else {
            output.push_str(&header);
        }
        output.push('\n');
        output.push_str(statement.text());
        output.push_str("\n\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::parse_script;

    #[test]
    fn test_record_from_statement() {
        let statements = parse_script("select 1;").unwrap();
        let record = StatementRecord::from(&statements[0]);
        assert_eq!(record.category, StatementCategory::Sql);
        assert_eq!(record.text, "select 1");
    }

    #[test]
    fn test_text_listing_plain() {
        let statements = parse_script("-- c\nselect 1;").unwrap();
        let opts = OutputOptions {
            colored: false,
            ..Default::default()
        };
        let text = format_statements(&statements, &opts);
        assert!(text.contains("Statement #1 (COMMENT):"));
        assert!(text.contains("Statement #2 (SQL):\nselect 1"));
    }
}
