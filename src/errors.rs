//! Error types with rich diagnostics using miette
//!
//! Only attribute sources can be malformed. Geometry, paint and drawing accept
//! whatever values they are given and have no error paths.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone, PartialEq)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while parsing an attribute source
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("syntax error: {message}")]
    #[diagnostic(
        code(shadowcard::parse::syntax),
        help("entries look like `app:corner_radius = \"16dp\"`")
    )]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid color: {literal}")]
    #[diagnostic(
        code(shadowcard::parse::invalid_color),
        help("use #RGB, #ARGB, #RRGGBB or #AARRGGBB")
    )]
    InvalidColor {
        literal: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a color")]
        span: SourceSpan,
    },

    #[error("invalid number: {literal}")]
    #[diagnostic(code(shadowcard::parse::invalid_number))]
    InvalidNumber {
        literal: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },
}

// ============================================================================
// Load Errors
// ============================================================================

/// Errors that occur while turning an attribute set into a style
#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("`{name}` expects a {expected}, got a {got}")]
    #[diagnostic(code(shadowcard::load::type_mismatch))]
    TypeMismatch {
        name: String,
        expected: &'static str,
        got: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("this is a {got}")]
        span: SourceSpan,
    },
}
