use crate::*;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Arc;

#[test]
fn test_builtin_map_rewrites_to_tuple() {
    let result = map_type("Map[type, int, str]", "{}").unwrap();

    assert_eq!(result, Some("Tuple[type[int], type[str]]".to_string()));
}

#[test]
fn test_builtin_map_single_operand() {
    let result = map_type("Map[type, List[int]]", "{}").unwrap();

    assert_eq!(result, Some("Tuple[type[List[int]]]".to_string()));
}

#[test]
fn test_non_map_root_is_a_no_op() {
    let result = map_type("List[int]", "{}").unwrap();

    assert_eq!(result, None);
}

#[test]
fn test_bare_constructor_is_a_no_op() {
    let result = map_type("int", "{}").unwrap();

    assert_eq!(result, None);
}

#[test]
fn test_map_reached_through_alias() {
    let result = map_type("Rewrite[type, int]", r#"{"Rewrite": "Map"}"#).unwrap();

    assert_eq!(result, Some("Tuple[type[int]]".to_string()));
}

#[test]
fn test_map_without_operands_fails() {
    let result = map_type("Map[type]", "{}");

    match result {
        Err(EngineError::TransformFailure { name, .. }) => assert_eq!(name, "Map"),
        other => panic!("Expected TransformFailure, got {other:?}"),
    }
}

#[test]
fn test_bare_map_fails() {
    let result = map_type("Map", "{}");

    assert!(matches!(
        result,
        Err(EngineError::TransformFailure { .. })
    ));
}

#[test]
fn test_unknown_symbol_propagates() {
    let result = map_type("Missing[int]", "{}");

    match result {
        Err(EngineError::UnknownSymbol { name, .. }) => assert_eq!(name, "Missing"),
        other => panic!("Expected UnknownSymbol, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_propagates() {
    let result = map_type("Map[type,", "{}");

    assert!(matches!(result, Err(EngineError::Syntax(_))));
}

#[test]
fn test_custom_map_through_preresolved_entry() {
    // A caller-supplied type map that reverses its operands
    let reverse = ResolvedEntity::with_type_map(
        "Reverse",
        Arc::new(
            |call: &ResolvedTypeFunction, _original: &str| -> Result<String, TransformError> {
                let ResolvedTypeFunction::Entity { args, .. } = call else {
                    return Err(TransformError::new("Reverse must be applied"));
                };
                let elements: Vec<String> =
                    args.iter().rev().map(|arg| arg.to_string()).collect();
                Ok(format!("Tuple[{}]", elements.join(", ")))
            },
        ),
    );
    let mut preresolved = HashMap::new();
    preresolved.insert("Reverse".to_string(), reverse);

    let result = map_type_with(
        "Reverse[int, str, bool]",
        r#"{"Reverse": "unused"}"#,
        Some(&preresolved),
    )
    .unwrap();

    assert_eq!(result, Some("Tuple[bool, str, int]".to_string()));
}

#[test]
fn test_custom_map_transform_failure_propagates() {
    let failing = ResolvedEntity::with_type_map(
        "Failing",
        Arc::new(
            |_call: &ResolvedTypeFunction, _original: &str| -> Result<String, TransformError> {
                Err(TransformError::new("unsupported operand"))
            },
        ),
    );
    let mut preresolved = HashMap::new();
    preresolved.insert("Failing".to_string(), failing);

    let result = map_type_with(
        "Failing[int]",
        r#"{"Failing": "unused"}"#,
        Some(&preresolved),
    );

    match result {
        Err(EngineError::TransformFailure { name, reason }) => {
            assert_eq!(name, "Failing");
            assert_eq!(reason, "unsupported operand");
        }
        other => panic!("Expected TransformFailure, got {other:?}"),
    }
}
