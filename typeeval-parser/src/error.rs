// Parser error handling with miette integration

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main parse error type with miette integration
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Syntax error in type expression")]
    #[diagnostic(
        code(typeeval::parse::syntax_error),
        help("Check the expression near the highlighted location")
    )]
    SyntaxError {
        #[source_code]
        src: String,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(code(typeeval::parse::unexpected_rule), help("Expected rule: {expected}"))]
    UnexpectedRule {
        expected: String,
        found: Rule,
        span: crate::ast::Span,
    },
}

impl ParseError {
    /// Create a syntax error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 0),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError {
                positives,
                negatives: _,
            } => {
                if positives.is_empty() {
                    "unexpected input".to_string()
                } else {
                    let expected: Vec<String> = positives
                        .iter()
                        .map(rule_to_user_friendly_description)
                        .collect();
                    format!("expected {}", expected.join(" or "))
                }
            }
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError::SyntaxError { src, span, message }
    }

    /// The offending source text this error was raised for
    pub fn source_text(&self) -> Option<&str> {
        match self {
            ParseError::SyntaxError { src, .. } => Some(src),
            ParseError::UnexpectedRule { .. } => None,
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> String {
    match rule {
        Rule::type_expr | Rule::union_member | Rule::primary => "a type expression".to_string(),
        Rule::name | Rule::name_segment => "a name (like Foo or collections.Sequence)".to_string(),
        Rule::none_literal => "the literal None".to_string(),
        Rule::subscript => "a subscript (like [int, str])".to_string(),
        Rule::mapping_literal => "a mapping literal (like {\"Foo\": \"Bar\"})".to_string(),
        Rule::mapping_pair => "a quoted key and value (like \"Foo\": \"Bar\")".to_string(),
        Rule::mapping_value => "a quoted expression string or None".to_string(),
        Rule::string => "a quoted string".to_string(),
        Rule::EOI => "end of input".to_string(),
        _ => format!("{rule:?}").replace('_', " "),
    }
}
