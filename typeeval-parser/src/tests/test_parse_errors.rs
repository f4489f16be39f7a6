use crate::*;

#[test]
fn test_empty_input_fails() {
    let result = parse_type_expr("");

    assert!(matches!(result, Err(ParseError::SyntaxError { .. })));
}

#[test]
fn test_unclosed_subscript_fails() {
    let result = parse_type_expr("Foo[int");

    assert!(matches!(result, Err(ParseError::SyntaxError { .. })));
}

#[test]
fn test_dangling_union_fails() {
    let result = parse_type_expr("int |");

    assert!(matches!(result, Err(ParseError::SyntaxError { .. })));
}

#[test]
fn test_trailing_garbage_fails() {
    let result = parse_type_expr("Foo bar");

    assert!(matches!(result, Err(ParseError::SyntaxError { .. })));
}

#[test]
fn test_error_carries_offending_text() {
    let input = "Foo[int";
    let error = parse_type_expr(input).unwrap_err();

    assert_eq!(error.source_text(), Some(input));
}

#[test]
fn test_unquoted_mapping_key_fails() {
    let result = parse_mapping_literal("{Foo: \"Bar\"}");

    assert!(matches!(result, Err(ParseError::SyntaxError { .. })));
}

#[test]
fn test_unclosed_mapping_fails() {
    let result = parse_mapping_literal(r#"{"Foo": "Bar""#);

    assert!(matches!(result, Err(ParseError::SyntaxError { .. })));
}
