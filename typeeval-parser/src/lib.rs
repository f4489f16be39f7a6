// typeeval Parser Library
// Pest-based parser for serialized type expressions and table literals

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::*;

// Re-export parser rule for manual testing
pub use parser::Rule;

// Main parsing functions
pub fn parse_type_expr(input: &str) -> Result<TypeExpr, ParseError> {
    parser::TypeExprParser::parse_type_expr(input)
}

pub fn parse_mapping_literal(input: &str) -> Result<MappingLiteral, ParseError> {
    parser::TypeExprParser::parse_mapping_literal(input)
}

#[cfg(test)]
mod tests;
