//! Parse pest pairs into an [`AttributeSet`]

use miette::SourceSpan;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::ast::*;
use crate::errors::{ParseError, SourceContext};
use crate::types::Color;
use crate::{AttrParser, Rule};

/// Parse an attribute source into an attribute set
pub fn parse(name: &str, source: &str) -> Result<AttributeSet, ParseError> {
    let ctx = SourceContext::new(name, source);
    let pairs = AttrParser::parse(Rule::source, source).map_err(|e| syntax_error(&ctx, e))?;

    let mut attributes = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::source {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::attribute {
                    attributes.push(parse_attribute(&ctx, inner)?);
                }
            }
        }
    }

    Ok(AttributeSet {
        source: ctx,
        attributes,
    })
}

fn syntax_error(ctx: &SourceContext, e: pest::error::Error<Rule>) -> ParseError {
    let span: SourceSpan = match e.location {
        InputLocation::Pos(p) => (p, 0).into(),
        InputLocation::Span((start, end)) => (start, end - start).into(),
    };
    ParseError::Syntax {
        message: e.variant.message().into_owned(),
        src: ctx.named_source(),
        span,
    }
}

fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

/// The grammar guarantees the shape of every rule; this only fires if the
/// grammar and this file drift apart.
fn malformed(ctx: &SourceContext, pair: &Pair<Rule>) -> ParseError {
    ParseError::Syntax {
        message: format!("unexpected {:?}", pair.as_rule()),
        src: ctx.named_source(),
        span: span_of(pair),
    }
}

fn parse_attribute(ctx: &SourceContext, pair: Pair<Rule>) -> Result<Attribute, ParseError> {
    let outer = pair.clone();
    let mut inner = pair.into_inner();
    let (Some(qualified), Some(value)) = (inner.next(), inner.next()) else {
        return Err(malformed(ctx, &outer));
    };

    let mut namespace = None;
    let mut name = String::new();
    for part in qualified.into_inner() {
        match part.as_rule() {
            Rule::namespace => namespace = Some(part.as_str().to_string()),
            Rule::name => name = part.as_str().to_string(),
            _ => return Err(malformed(ctx, &part)),
        }
    }

    // Quotes are transparent: `"16dp"` and `16dp` are the same value
    let value = if value.as_rule() == Rule::quoted {
        let quoted = value.clone();
        value
            .into_inner()
            .next()
            .ok_or_else(|| malformed(ctx, &quoted))?
    } else {
        value
    };

    Ok(Attribute {
        namespace,
        name,
        span: span_of(&value),
        value: parse_value(ctx, value)?,
    })
}

fn parse_value(ctx: &SourceContext, pair: Pair<Rule>) -> Result<AttrValue, ParseError> {
    match pair.as_rule() {
        Rule::color => {
            let literal = pair.as_str();
            literal
                .parse::<Color>()
                .map(AttrValue::Color)
                .map_err(|_| ParseError::InvalidColor {
                    literal: literal.to_string(),
                    src: ctx.named_source(),
                    span: span_of(&pair),
                })
        }
        Rule::boolean => Ok(AttrValue::Bool(pair.as_str() == "true")),
        Rule::number => parse_number(ctx, &pair).map(AttrValue::Number),
        Rule::dimension => {
            let outer = pair.clone();
            let mut inner = pair.into_inner();
            let (Some(number), Some(unit)) = (inner.next(), inner.next()) else {
                return Err(malformed(ctx, &outer));
            };
            let unit = match unit.as_str() {
                "dp" | "dip" => DimensionUnit::Dp,
                "px" => DimensionUnit::Px,
                _ => return Err(malformed(ctx, &unit)),
            };
            Ok(AttrValue::Dimension(parse_number(ctx, &number)?, unit))
        }
        _ => Err(malformed(ctx, &pair)),
    }
}

fn parse_number(ctx: &SourceContext, pair: &Pair<Rule>) -> Result<f32, ParseError> {
    pair.as_str()
        .parse::<f32>()
        .map_err(|_| ParseError::InvalidNumber {
            literal: pair.as_str().to_string(),
            src: ctx.named_source(),
            span: span_of(pair),
        })
}
