//! Error types for message tokenizing, date parsing and configuration.
//!
//! Extraction of passenger data never fails on partial input; these errors
//! only cover broken preconditions (no usable service string advice) and
//! the utilities that callers may invoke directly.

use std::fmt;

/// Error type for message-level parsing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The message was empty or blank.
    EmptyMessage,
    /// A `UNA` segment was present but too short to carry all delimiters.
    InvalidServiceString(String),
    /// A segment the caller required was not present in the message.
    SegmentNotFound {
        tag: String,
    },
    /// A date string did not match the expected fixed format.
    InvalidDate {
        value: String,
        format: &'static str,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyMessage => write!(f, "Message is empty"),
            ParseError::InvalidServiceString(una) => {
                write!(f, "Invalid UNA service string advice: '{}'", una)
            }
            ParseError::SegmentNotFound { tag } => {
                write!(f, "Segment '{}' not found in message", tag)
            }
            ParseError::InvalidDate { value, format } => {
                write!(f, "Date '{}' does not match format {}", value, format)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Error type for loading name normalization tables
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Yaml(e) => write!(f, "YAML error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
