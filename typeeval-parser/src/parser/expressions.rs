// Type expression parsing
// Turns pest pairs into TypeExpr trees: names, applications, unions, None.

use crate::ast::*;
use crate::error::*;
use crate::parser::{Rule, TypeExprParser};

impl TypeExprParser {
    /// Parse a `type_expr` rule: one union member or a `|`-separated union
    pub(crate) fn parse_expression(pair: pest::iterators::Pair<Rule>) -> ParseResult<TypeExpr> {
        let span = Self::span_from_pair(&pair);

        let mut members = Vec::new();
        for inner_pair in pair.into_inner() {
            match inner_pair.as_rule() {
                Rule::union_member => members.push(Self::parse_union_member(inner_pair)?),
                _ => return Err(Self::unexpected_rule(&inner_pair, "union_member")),
            }
        }

        if members.len() == 1 {
            Ok(members.into_iter().next().unwrap())
        } else {
            Ok(TypeExpr {
                kind: TypeExprKind::Union { members },
                span,
            })
        }
    }

    /// Parse a `union_member` rule: a primary with zero or more subscripts
    pub(crate) fn parse_union_member(pair: pest::iterators::Pair<Rule>) -> ParseResult<TypeExpr> {
        let mut inner_pairs = pair.into_inner();

        let primary_pair = inner_pairs.next().unwrap();
        let mut expr = Self::parse_primary(primary_pair)?;

        // Chained subscripts fold left: Foo[int][str] applies to Foo[int]
        for subscript_pair in inner_pairs {
            if subscript_pair.as_rule() != Rule::subscript {
                return Err(Self::unexpected_rule(&subscript_pair, "subscript"));
            }
            let subscript_span = Self::span_from_pair(&subscript_pair);

            let mut args = Vec::new();
            for arg_pair in subscript_pair.into_inner() {
                if arg_pair.as_rule() == Rule::type_expr {
                    args.push(Self::parse_expression(arg_pair)?);
                }
            }

            let span = Span::new(expr.span.start, subscript_span.end);
            expr = TypeExpr {
                kind: TypeExprKind::Application {
                    base: Box::new(expr),
                    args,
                },
                span,
            };
        }

        Ok(expr)
    }

    /// Parse a `primary` rule: None, a name, or a parenthesized expression
    pub(crate) fn parse_primary(pair: pest::iterators::Pair<Rule>) -> ParseResult<TypeExpr> {
        let span = Self::span_from_pair(&pair);
        let inner_pair = pair.into_inner().next().unwrap();

        match inner_pair.as_rule() {
            Rule::none_literal => Ok(TypeExpr {
                kind: TypeExprKind::NoneLiteral,
                span,
            }),
            Rule::name => {
                let name_span = Self::span_from_pair(&inner_pair);
                Ok(TypeExpr {
                    kind: TypeExprKind::Name(Name {
                        name: inner_pair.as_str().to_string(),
                        span: name_span,
                    }),
                    span,
                })
            }
            Rule::type_expr => Self::parse_expression(inner_pair),
            _ => Err(Self::unexpected_rule(&inner_pair, "none_literal, name or type_expr")),
        }
    }
}
