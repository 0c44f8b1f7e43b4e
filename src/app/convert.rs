//! Conversion of CLI-facing types to internal types.

use crate::{cli::Format, output::OutputFormat};

/// Converts a CLI format enum to the internal output format type.
///
/// # Example
///
/// ```
/// use tabulify_sql::{app::convert_format, cli::Format, output::OutputFormat};
///
/// assert!(matches!(convert_format(Format::Yaml), OutputFormat::Yaml));
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}
