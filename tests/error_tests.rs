// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_advisor::error::{
    config_error, file_read_error, invalid_input_error, serialization_error
};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/file.sql", io_error);
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid configuration");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_invalid_input_error() {
    let error = invalid_input_error("no SQL to analyze");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_serialization_error() {
    let error = serialization_error("YAML", "recursion limit exceeded");
    assert!(!error.to_string().is_empty());
}

#[test]
fn test_errors_are_debug() {
    let error = config_error("x");
    assert!(!format!("{:?}", error).is_empty());
}
