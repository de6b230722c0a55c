pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create invalid input error
///
/// Raised by the CLI before any scanning starts, e.g. when no SQL was
/// supplied at all.
pub fn invalid_input_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("Invalid input: {}", message.into()))
}

/// Create serialization error for JSON/YAML output
pub fn serialization_error(format: &str, message: impl std::fmt::Display) -> AppError {
    AppError::internal(format!("Failed to serialize {} output: {}", format, message))
}
