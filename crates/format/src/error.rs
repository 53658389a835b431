//! Error types for the properties text format.

use thiserror::Error;

/// Errors that can occur while reading properties text.
#[derive(Error, Debug)]
pub enum PropertiesError {
    /// The input is not valid UTF-8.
    #[error("properties text is not valid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    /// A `\uXXXX` escape did not have four hex digits after it.
    #[error("malformed \\uXXXX encoding on line {line}")]
    MalformedUnicodeEscape { line: usize },

    /// A `\uXXXX` escape decoded to an invalid character (a lone surrogate).
    #[error("\\uXXXX escape on line {line} is not a valid character")]
    InvalidUnicodeScalar { line: usize },
}
