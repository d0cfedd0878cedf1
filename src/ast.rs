//! Attribute bag model: what a declarative style source parses into.

use miette::SourceSpan;

use crate::errors::SourceContext;
use crate::types::Color;

/// Unit suffix on a dimension literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionUnit {
    /// `dp` / `dip`
    Dp,
    /// `px`
    Px,
}

/// A literal attribute value, as written
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrValue {
    Dimension(f32, DimensionUnit),
    Color(Color),
    Bool(bool),
    /// Bare number without unit
    Number(f32),
}

impl AttrValue {
    /// Human-readable kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Dimension(..) => "dimension",
            AttrValue::Color(_) => "color",
            AttrValue::Bool(_) => "boolean",
            AttrValue::Number(_) => "number",
        }
    }
}

/// One `[namespace:]name = value` entry
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Optional namespace prefix (`app` in `app:corner_radius`)
    pub namespace: Option<String>,
    pub name: String,
    pub value: AttrValue,
    /// Span of the value, for error labels
    pub span: SourceSpan,
}

/// Parsed attribute source, in declaration order
#[derive(Debug, Clone)]
pub struct AttributeSet {
    pub source: SourceContext,
    pub attributes: Vec<Attribute>,
}

impl AttributeSet {
    /// Last value given for `name`, if any
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().rev().find(|a| a.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }
}
