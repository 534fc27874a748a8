//! Core error types

use miette::Diagnostic;
use thiserror::Error;

/// Failure raised by a shim.
///
/// Every variant is fatal to the enclosing template evaluation: it signals a
/// contract violation between generated template code and its inputs, not a
/// data-dependent condition. Non-fatal outcomes are reported through the
/// `(value, ok)` pairs returned by the test-style shims instead.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ShimError {
    #[error("expected type of {expected:?} got: {actual}")]
    #[diagnostic(
        code(helmshim::shim::type_mismatch),
        help("use a type test instead of an assertion when the type depends on input data")
    )]
    TypeMismatch {
        expected: String,
        actual: &'static str,
    },

    #[error("nil dereference")]
    #[diagnostic(
        code(helmshim::shim::nil_dereference),
        help("use ptr_Deref with a default when the value may be absent")
    )]
    NilDereference,

    #[error("invalid quantity type: expected {expected}, got: {actual}")]
    #[diagnostic(code(helmshim::shim::invalid_quantity_type))]
    InvalidQuantityType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid quantity {input:?}")]
    #[diagnostic(
        code(helmshim::shim::invalid_quantity_format),
        help("quantities look like `2`, `1.5Gi`, `500M` or `250m`")
    )]
    InvalidQuantityFormat { input: String },

    #[error("unknown unit {unit:?} in quantity {input:?}")]
    #[diagnostic(
        code(helmshim::shim::unknown_unit),
        help("supported units: m, k, M, G, T, P, Ki, Mi, Gi, Ti, Pi")
    )]
    UnknownUnit { unit: String, input: String },

    #[error("unknown type {name:?}")]
    #[diagnostic(code(helmshim::shim::unknown_type))]
    UnknownTypeTag { name: String },

    #[error("unknown shim {name:?}")]
    #[diagnostic(code(helmshim::shim::unknown_shim))]
    UnknownShim { name: String },

    #[error("{name} takes {expected} argument(s), got {actual}")]
    #[diagnostic(code(helmshim::shim::arity))]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl ShimError {
    /// Short machine-readable name of the failure
    pub fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::NilDereference => "nil_dereference",
            Self::InvalidQuantityType { .. } => "invalid_quantity_type",
            Self::InvalidQuantityFormat { .. } => "invalid_quantity_format",
            Self::UnknownUnit { .. } => "unknown_unit",
            Self::UnknownTypeTag { .. } => "unknown_type",
            Self::UnknownShim { .. } => "unknown_shim",
            Self::ArityMismatch { .. } => "arity",
        }
    }
}

/// Errors raised while loading values
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Values merge error: {message}")]
    ValuesMerge { message: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Result of a shim call
pub type ShimResult<T> = std::result::Result<T, ShimError>;
