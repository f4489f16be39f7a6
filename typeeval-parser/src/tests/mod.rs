pub mod test_parse_errors;
pub mod test_type_expressions;
