//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use chartpack_core::CoreError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Invalid configuration or overrides; nothing was written
    #[error("Configuration error: {message}")]
    #[diagnostic(code(chartpack::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Filesystem failure while building a chart
    #[error("IO error: {message}")]
    #[diagnostic(code(chartpack::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(chartpack::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::UnknownVariant { known, .. } => {
                CliError::config_with_help(message, format!("Use one of: {known}"))
            }
            CoreError::InvalidProperty { .. } => CliError::config_with_help(
                message,
                "Properties are passed as -D fabric8.helm.<name>=<value>",
            ),
            CoreError::ProjectNotFound { .. } => CliError::config_with_help(
                message,
                "Pass the project descriptor with --project or run from the project root",
            ),
            CoreError::ProjectParse { .. } | CoreError::InvalidProject { .. } => CliError::Config {
                message,
                help: None,
            },
            CoreError::CleanOutput { .. }
            | CoreError::CopyTemplates { .. }
            | CoreError::WriteChart { .. }
            | CoreError::CopySupportFile { .. }
            | CoreError::Archive { .. }
            | CoreError::Io(_) => CliError::Io { message },
            CoreError::Publish { .. } => CliError::Internal { message },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
