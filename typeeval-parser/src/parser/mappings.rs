// Mapping literal parsing
// Handles the serialized table literals: {"Foo": "Bar[int]", "T": None}

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, TypeExprParser};

impl TypeExprParser {
    /// Parse a `mapping_literal` rule
    pub(crate) fn parse_mapping(pair: pest::iterators::Pair<Rule>) -> ParseResult<MappingLiteral> {
        let span = Self::span_from_pair(&pair);

        let mut entries = Vec::new();
        for inner_pair in pair.into_inner() {
            if inner_pair.as_rule() == Rule::mapping_pair {
                entries.push(Self::parse_mapping_pair(inner_pair)?);
            }
        }

        Ok(MappingLiteral { entries, span })
    }

    /// Parse a `mapping_pair` rule: `"key": value`
    pub(crate) fn parse_mapping_pair(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<MappingEntry> {
        let span = Self::span_from_pair(&pair);
        let mut inner_pairs = pair.into_inner();

        let key_pair = inner_pairs.next().unwrap();
        let (key, key_span) = Self::string_contents(&key_pair);

        let value_pair = inner_pairs.next().unwrap();
        let value = Self::parse_mapping_value(value_pair)?;

        Ok(MappingEntry {
            key,
            key_span,
            value,
            span,
        })
    }

    /// Parse a `mapping_value` rule: a quoted expression string or bare None
    pub(crate) fn parse_mapping_value(
        pair: pest::iterators::Pair<Rule>,
    ) -> ParseResult<MappingValue> {
        let inner_pair = pair.into_inner().next().unwrap();

        match inner_pair.as_rule() {
            Rule::none_literal => Ok(MappingValue::None {
                span: Self::span_from_pair(&inner_pair),
            }),
            Rule::string => {
                let (text, span) = Self::string_contents(&inner_pair);
                Ok(MappingValue::Expr { text, span })
            }
            _ => Err(Self::unexpected_rule(&inner_pair, "none_literal or string")),
        }
    }

    /// Strip the surrounding quotes from an atomic `string` pair
    fn string_contents(pair: &pest::iterators::Pair<Rule>) -> (String, Span) {
        let quoted = pair.as_str();
        let outer = Self::span_from_pair(pair);
        let contents = quoted[1..quoted.len() - 1].to_string();
        (contents, Span::new(outer.start + 1, outer.end - 1))
    }
}
