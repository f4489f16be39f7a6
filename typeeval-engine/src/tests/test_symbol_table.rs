use crate::builtins::standard_builtins;
use crate::*;
use std::collections::HashMap;

#[test]
fn test_empty_literal_exposes_builtins() {
    let table = SymbolTable::build("{}", None, &standard_builtins()).unwrap();

    assert!(table.contains("int"));
    assert!(table.contains("List"));
    assert!(table.contains("This"));
    assert!(table.contains("Map"));
    assert!(table.contains("IsSequenceOf"));
}

#[test]
fn test_simple_alias() {
    let table =
        SymbolTable::build(r#"{"MyList": "List"}"#, None, &standard_builtins()).unwrap();

    let entity = table.get("MyList").unwrap();
    assert_eq!(entity.name(), "List");
    assert_eq!(entity.kind(), EntityKind::Constructor);
}

#[test]
fn test_alias_preserves_capabilities() {
    let table =
        SymbolTable::build(r#"{"Rewrite": "Map"}"#, None, &standard_builtins()).unwrap();

    let entity = table.get("Rewrite").unwrap();
    assert!(entity.implements(Capability::TypeMap));
}

#[test]
fn test_entry_may_reference_earlier_entry() {
    let table = SymbolTable::build(
        r#"{"A": "List", "B": "A"}"#,
        None,
        &standard_builtins(),
    )
    .unwrap();

    assert_eq!(table.get("B").unwrap().name(), "List");
}

#[test]
fn test_alias_to_parameterized_expression_keeps_constructor() {
    // The entry stores the root entity; arguments matter at resolution time
    let table = SymbolTable::build(
        r#"{"IntList": "List[int]"}"#,
        None,
        &standard_builtins(),
    )
    .unwrap();

    assert_eq!(table.get("IntList").unwrap().name(), "List");
}

#[test]
fn test_forward_reference_fails() {
    let result = SymbolTable::build(
        r#"{"A": "B", "B": "int"}"#,
        None,
        &standard_builtins(),
    );

    match result {
        Err(EngineError::UnresolvedSymbol { name, entry }) => {
            assert_eq!(name, "B");
            assert_eq!(entry, "A");
        }
        other => panic!("Expected UnresolvedSymbol, got {other:?}"),
    }
}

#[test]
fn test_unknown_reference_fails() {
    let result = SymbolTable::build(r#"{"A": "Missing"}"#, None, &standard_builtins());

    assert!(matches!(
        result,
        Err(EngineError::UnresolvedSymbol { .. })
    ));
}

#[test]
fn test_duplicate_entry_fails() {
    let result = SymbolTable::build(
        r#"{"A": "int", "A": "str"}"#,
        None,
        &standard_builtins(),
    );

    match result {
        Err(EngineError::DuplicateSymbol { name, .. }) => assert_eq!(name, "A"),
        other => panic!("Expected DuplicateSymbol, got {other:?}"),
    }
}

#[test]
fn test_shadowing_builtin_fails() {
    let result = SymbolTable::build(r#"{"List": "int"}"#, None, &standard_builtins());

    assert!(matches!(result, Err(EngineError::DuplicateSymbol { .. })));
}

#[test]
fn test_none_definition_fails() {
    let result = SymbolTable::build(r#"{"A": None}"#, None, &standard_builtins());

    assert!(matches!(
        result,
        Err(EngineError::InvalidDefinition { .. })
    ));
}

#[test]
fn test_preresolved_entry_takes_fast_path() {
    let custom = ResolvedEntity::constructor("Custom");
    let mut preresolved = HashMap::new();
    preresolved.insert("A".to_string(), custom.clone());

    // The definition text is not even valid syntax; the fast path must
    // never parse it
    let table = SymbolTable::build(
        r#"{"A": "!!not an expression!!"}"#,
        Some(&preresolved),
        &standard_builtins(),
    )
    .unwrap();

    assert!(table.get("A").unwrap().same_handle(&custom));
}

#[test]
fn test_preresolved_entry_still_rejects_duplicates() {
    let mut preresolved = HashMap::new();
    preresolved.insert("A".to_string(), ResolvedEntity::constructor("Custom"));

    let result = SymbolTable::build(
        r#"{"A": "int", "A": "str"}"#,
        Some(&preresolved),
        &standard_builtins(),
    );

    assert!(matches!(result, Err(EngineError::DuplicateSymbol { .. })));
}

#[test]
fn test_invalid_expression_in_definition_fails() {
    let result = SymbolTable::build(r#"{"A": "List[int"}"#, None, &standard_builtins());

    assert!(matches!(result, Err(EngineError::Syntax(_))));
}
