// Pest-based parser for type expressions and mapping literals

pub mod expressions;
pub mod mappings;

use crate::ast::{MappingLiteral, Span, TypeExpr};
use crate::error::{ParseError, ParseResult};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct TypeExprParser;

impl TypeExprParser {
    /// Parse a complete type expression (e.g. `Foo[Bar, None]`)
    pub fn parse_type_expr(input: &str) -> ParseResult<TypeExpr> {
        let mut pairs = Self::parse(Rule::type_expr_input, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let root = pairs.next().unwrap();
        let expr_pair = root.into_inner().next().unwrap();
        Self::parse_expression(expr_pair)
    }

    /// Parse a serialized mapping literal (e.g. `{"Foo": "Bar"}`)
    pub fn parse_mapping_literal(input: &str) -> ParseResult<MappingLiteral> {
        let mut pairs = Self::parse(Rule::mapping_input, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let root = pairs.next().unwrap();
        let literal_pair = root.into_inner().next().unwrap();
        Self::parse_mapping(literal_pair)
    }

    pub(crate) fn span_from_pair(pair: &pest::iterators::Pair<Rule>) -> Span {
        let span = pair.as_span();
        Span::new(span.start(), span.end())
    }

    pub(crate) fn unexpected_rule(
        pair: &pest::iterators::Pair<Rule>,
        expected: &str,
    ) -> ParseError {
        ParseError::UnexpectedRule {
            expected: expected.to_string(),
            found: pair.as_rule(),
            span: Self::span_from_pair(pair),
        }
    }
}
