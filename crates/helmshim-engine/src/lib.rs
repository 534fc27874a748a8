//! helmshim engine - renders generated templates against the shim runtime
//!
//! This crate provides a MiniJinja environment with:
//! - The shim registry exposed as one global object (`_shims` by default)
//! - Shim failures surfaced as source-mapped diagnostics
//! - Directory rendering that collects every error before reporting

pub mod config;
pub mod engine;
pub mod error;
pub mod namespace;

pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::{
    EngineError, RenderReport, RenderOutcome, Result, TemplateError, TemplateErrorKind,
};
pub use namespace::ShimNamespace;
