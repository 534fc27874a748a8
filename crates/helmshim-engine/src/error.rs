//! Engine error types with source-mapped diagnostics

use helmshim_core::ShimError;
use indexmap::IndexMap;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Main engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Template error")]
    Template(#[from] TemplateError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Error kind for categorizing template errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TemplateErrorKind {
    /// A shim aborted the evaluation
    ShimFailure,
    UndefinedVariable,
    UnknownFunction,
    UnknownMethod,
    SyntaxError,
    TypeError,
    InvalidOperation,
    Other,
}

impl TemplateErrorKind {
    /// Convert to a code string for diagnostics
    pub fn to_code_string(&self) -> &'static str {
        match self {
            Self::ShimFailure => "shim",
            Self::UndefinedVariable => "undefined_variable",
            Self::UnknownFunction => "unknown_function",
            Self::UnknownMethod => "unknown_method",
            Self::SyntaxError => "syntax",
            Self::TypeError => "type",
            Self::InvalidOperation => "invalid_operation",
            Self::Other => "render",
        }
    }
}

/// Template-specific error with source information
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(helmshim::template::render))]
pub struct TemplateError {
    /// Error message
    pub message: String,

    /// Error kind for categorization
    pub kind: TemplateErrorKind,

    /// The shim failure behind this error, if any
    pub shim: Option<ShimError>,

    /// Template source code
    #[source_code]
    pub src: NamedSource<String>,

    /// Error location in source
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// Suggestion for fixing the error
    #[help]
    pub suggestion: Option<String>,
}

impl TemplateError {
    /// Create a new template error from a MiniJinja error
    pub fn from_minijinja(err: minijinja::Error, template_name: &str, template_source: &str) -> Self {
        let shim = shim_failure(&err).cloned();
        let kind = if shim.is_some() {
            TemplateErrorKind::ShimFailure
        } else {
            categorize_minijinja_error(&err)
        };

        let message = match &shim {
            Some(shim_err) => format!("shim failed: {}", shim_err),
            None => err
                .to_string()
                .replace("invalid operation: ", "")
                .replace("syntax error: ", "")
                .replace("undefined value", "undefined variable"),
        };

        let span = err
            .line()
            .and_then(|line_num| calculate_span(template_source, line_num));

        let suggestion = generate_suggestion(kind, shim.as_ref());

        Self {
            message,
            kind,
            shim,
            src: NamedSource::new(template_name, template_source.to_string()),
            span,
            suggestion,
        }
    }

    /// Create a simple error without source mapping
    pub fn simple(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: TemplateErrorKind::Other,
            shim: None,
            src: NamedSource::new("<unknown>", String::new()),
            span: None,
            suggestion: None,
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> TemplateErrorKind {
        self.kind
    }
}

/// Find a shim failure in the error's source chain
fn shim_failure(err: &minijinja::Error) -> Option<&ShimError> {
    let mut source = std::error::Error::source(err);
    while let Some(current) = source {
        if let Some(shim_err) = current.downcast_ref::<ShimError>() {
            return Some(shim_err);
        }
        source = current.source();
    }
    None
}

/// Categorize a MiniJinja error into our error kinds
fn categorize_minijinja_error(err: &minijinja::Error) -> TemplateErrorKind {
    match err.kind() {
        minijinja::ErrorKind::UndefinedError => TemplateErrorKind::UndefinedVariable,
        minijinja::ErrorKind::UnknownFunction => TemplateErrorKind::UnknownFunction,
        minijinja::ErrorKind::UnknownMethod => TemplateErrorKind::UnknownMethod,
        minijinja::ErrorKind::SyntaxError => TemplateErrorKind::SyntaxError,
        minijinja::ErrorKind::InvalidOperation => TemplateErrorKind::InvalidOperation,
        minijinja::ErrorKind::NonPrimitive | minijinja::ErrorKind::NonKey => {
            TemplateErrorKind::TypeError
        }
        _ => TemplateErrorKind::Other,
    }
}

/// Calculate the source span for a given line number
fn calculate_span(source: &str, line_num: usize) -> Option<SourceSpan> {
    let mut offset = 0;

    for (idx, line) in source.lines().enumerate() {
        if idx + 1 == line_num {
            return Some(SourceSpan::new(offset.into(), line.len().into()));
        }
        offset += line.len() + 1; // +1 for newline
    }

    None
}

fn generate_suggestion(kind: TemplateErrorKind, shim: Option<&ShimError>) -> Option<String> {
    match kind {
        TemplateErrorKind::ShimFailure => shim
            .and_then(|err| err.help())
            .map(|help| help.to_string()),
        TemplateErrorKind::UnknownMethod => Some(format!(
            "Available shims: {}",
            helmshim_core::registry::shims()
                .iter()
                .map(|shim| shim.name)
                .collect::<Vec<_>>()
                .join(", ")
        )),
        TemplateErrorKind::UndefinedVariable => Some(
            "Variable is not defined. Check spelling or use `| default(...)`.".to_string(),
        ),
        TemplateErrorKind::SyntaxError => Some(
            "Check bracket matching: `{{ }}` for expressions, `{% %}` for statements".to_string(),
        ),
        _ => None,
    }
}

/// Errors collected while rendering a directory, grouped by template
#[derive(Debug, Default)]
pub struct RenderReport {
    pub errors_by_template: IndexMap<String, Vec<TemplateError>>,
    pub successful_templates: Vec<String>,
}

impl RenderReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, template_name: String, error: TemplateError) {
        self.errors_by_template
            .entry(template_name)
            .or_default()
            .push(error);
    }

    pub fn add_success(&mut self, template_name: String) {
        self.successful_templates.push(template_name);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors_by_template.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors_by_template.values().map(Vec::len).sum()
    }

    /// "3 errors in 2 templates"
    pub fn summary(&self) -> String {
        format!(
            "{} in {}",
            plural(self.error_count(), "error"),
            plural(self.errors_by_template.len(), "template")
        )
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Outputs of a directory render plus everything that went wrong
#[derive(Debug)]
pub struct RenderOutcome {
    /// Rendered outputs by template name, in file order
    pub outputs: IndexMap<String, String>,
    pub report: RenderReport,
}

impl RenderOutcome {
    pub fn is_success(&self) -> bool {
        !self.report.has_errors()
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_errors_per_template() {
        let mut report = RenderReport::new();
        assert!(!report.has_errors());

        report.add_error("a.yaml".to_string(), TemplateError::simple("error 1"));
        assert_eq!(report.summary(), "1 error in 1 template");

        report.add_error("a.yaml".to_string(), TemplateError::simple("error 2"));
        report.add_error("b.yaml".to_string(), TemplateError::simple("error 3"));
        assert_eq!(report.error_count(), 3);
        assert_eq!(report.summary(), "3 errors in 2 templates");
    }

    #[test]
    fn test_calculate_span() {
        let source = "first\nsecond line\nthird";
        let span = calculate_span(source, 2).unwrap();
        assert_eq!(span.offset(), 6);
        assert_eq!(span.len(), 11);
        assert!(calculate_span(source, 4).is_none());
    }

    #[test]
    fn test_kind_code_strings() {
        assert_eq!(TemplateErrorKind::ShimFailure.to_code_string(), "shim");
        assert_eq!(TemplateErrorKind::SyntaxError.to_code_string(), "syntax");
    }

    #[test]
    fn test_shim_failure_is_detected() {
        let err = minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, "deref failed")
            .with_source(ShimError::NilDereference);
        let template_err = TemplateError::from_minijinja(err, "t.yaml", "x");

        assert_eq!(template_err.kind(), TemplateErrorKind::ShimFailure);
        assert_eq!(template_err.shim, Some(ShimError::NilDereference));
        insta::assert_snapshot!(template_err.message, @"shim failed: nil dereference");
        assert!(template_err.suggestion.unwrap().contains("ptr_Deref"));
    }
}
