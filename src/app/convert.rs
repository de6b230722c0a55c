//! Type conversion functions for CLI to internal types.

use tracing::Level;

use crate::{
    cli::{Format, LogLevel},
    output::OutputFormat
};

/// Converts a CLI format enum to the internal output format type.
///
/// # Example
///
/// ```
/// use sql_query_advisor::{app::convert_format, cli::Format, output::OutputFormat};
///
/// assert_eq!(convert_format(Format::Yaml), OutputFormat::Yaml);
/// ```
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Converts a CLI log level to a `tracing` level.
pub fn convert_log_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_format() {
        assert_eq!(convert_format(Format::Text), OutputFormat::Text);
        assert_eq!(convert_format(Format::Json), OutputFormat::Json);
    }

    #[test]
    fn test_convert_log_level() {
        assert_eq!(convert_log_level(LogLevel::Debug), Level::DEBUG);
        assert_eq!(convert_log_level(LogLevel::Error), Level::ERROR);
    }
}
