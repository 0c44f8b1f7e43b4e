pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create stream error raised while reading a script
///
/// `line` is the number of the last line successfully read (0 when the
/// failure happened before the first line).
pub fn stream_error(line: usize, source: std::io::Error) -> AppError {
    AppError::internal(format!(
        "Failed to read script after line {}: {}",
        line, source
    ))
}

/// Create structural input error for text that is not a single query
pub fn structural_input_error(query: &str) -> AppError {
    let shown = single_line(query);
    if shown.is_empty() {
        AppError::bad_request("Query parse error:\n  the query text is empty")
    } else {
        AppError::bad_request(format!(
            "Query parse error:\n  the query should start with `select` or `with`, got: {}",
            shown
        ))
    }
}

/// Create error for a statement, keeping the line it starts on
pub fn statement_error(start_line: usize, message: impl Into<String>) -> AppError {
    AppError::bad_request(format!(
        "Statement at line {}:\n  {}",
        start_line,
        message.into()
    ))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Collapse all whitespace runs of a text into single spaces
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_collapses_breaks() {
        assert_eq!(single_line("update t\n\tset x = 1\r\n"), "update t set x = 1");
    }

    #[test]
    fn test_single_line_trims_edges() {
        assert_eq!(single_line("  select 1  "), "select 1");
        assert_eq!(single_line(""), "");
    }

    #[test]
    fn test_error_constructors_render() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8");
        assert!(!stream_error(42, io).to_string().is_empty());
        assert!(!structural_input_error("update t").to_string().is_empty());
        assert!(!structural_input_error("").to_string().is_empty());
        assert!(!statement_error(3, "boom").to_string().is_empty());
    }
}
