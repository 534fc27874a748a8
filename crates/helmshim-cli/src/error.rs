//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use helmshim_core::{CoreError, ShimError};
use helmshim_engine::{EngineError, TemplateError};
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// A single template failed, with its source-mapped diagnostic
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(TemplateError),

    /// Several templates failed; details were already printed
    #[error("Template error: {message}")]
    #[diagnostic(code(helmshim::cli::template))]
    Template {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A shim called directly failed
    #[error("{error}")]
    #[diagnostic(code(helmshim::cli::shim))]
    Shim {
        error: ShimError,
        #[help]
        help: Option<String>,
    },

    /// Values or shim arguments could not be parsed
    #[error("Values error: {message}")]
    #[diagnostic(code(helmshim::cli::values))]
    Values {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Configuration file missing fields or invalid
    #[error("Configuration error: {message}")]
    #[diagnostic(code(helmshim::cli::config))]
    Config { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(helmshim::cli::io))]
    Io { message: String },

    /// Wrapped error for passthrough (stores the formatted message)
    #[error("{message}")]
    #[diagnostic(code(helmshim::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) | CliError::Template { .. } => exit_codes::TEMPLATE_ERROR,
            CliError::Shim { .. } => exit_codes::SHIM_ERROR,
            CliError::Values { .. } => exit_codes::VALUES_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a template error with help text
    pub fn template_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a values error with help text
    pub fn values_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Values {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<ShimError> for CliError {
    fn from(err: ShimError) -> Self {
        let help = err.help().map(|help| help.to_string());
        CliError::Shim { error: err, help }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(io) => io.into(),
            other => CliError::Values {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Template(te) => CliError::Render(te),
            EngineError::Config { message } => CliError::Config { message },
            EngineError::Yaml(e) => CliError::Config {
                message: e.to_string(),
            },
            EngineError::Io(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other {
            message: format!("Failed to serialize output: {}", err),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::from(ShimError::NilDereference).exit_code(),
            exit_codes::SHIM_ERROR
        );
        assert_eq!(
            CliError::from(EngineError::Config {
                message: "bad".to_string()
            })
            .exit_code(),
            exit_codes::CONFIG_ERROR
        );
        assert_eq!(
            CliError::from(std::io::Error::other("boom")).exit_code(),
            exit_codes::IO_ERROR
        );
    }

    #[test]
    fn test_shim_error_keeps_message_and_help() {
        let err = CliError::from(ShimError::NilDereference);
        assert_eq!(err.to_string(), "nil dereference");
        assert_eq!(
            err.code().map(|code| code.to_string()).as_deref(),
            Some("helmshim::cli::shim")
        );
        assert!(err.help().unwrap().to_string().contains("ptr_Deref"));
    }

    #[test]
    fn test_render_error_keeps_diagnostic() {
        let err = CliError::from(EngineError::Template(TemplateError::simple("broken")));
        assert!(matches!(err, CliError::Render(_)));
        assert_eq!(err.to_string(), "broken");
        assert_eq!(err.exit_code(), exit_codes::TEMPLATE_ERROR);
    }
}
