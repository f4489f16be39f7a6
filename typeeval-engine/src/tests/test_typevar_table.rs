use crate::builtins::standard_builtins;
use crate::*;

fn table_with_typevars(typevar_literal: &str) -> SymbolTable {
    let literal = typeeval_parser::parse_mapping_literal(typevar_literal).unwrap();
    let mut base = standard_builtins();
    for entry in &literal.entries {
        base.insert(entry.key.clone(), ResolvedEntity::type_var(&entry.key));
    }
    SymbolTable::build("{}", None, &base).unwrap()
}

#[test]
fn test_empty_table() {
    let symbols = table_with_typevars("{}");
    let bounds = TypeVarTable::build("{}", &symbols).unwrap();

    assert!(bounds.is_empty());
    assert!(bounds.bound("T").is_none());
}

#[test]
fn test_unconstrained_variable() {
    let symbols = table_with_typevars(r#"{"T": None}"#);
    let bounds = TypeVarTable::build(r#"{"T": None}"#, &symbols).unwrap();

    assert!(bounds.contains("T"));
    assert!(matches!(bounds.bound("T"), Some(None)));
}

#[test]
fn test_predicate_bound() {
    let literal = r#"{"T": "IsSequenceOf[int]"}"#;
    let symbols = table_with_typevars(literal);
    let bounds = TypeVarTable::build(literal, &symbols).unwrap();

    let bound = bounds.bound("T").unwrap().as_ref().unwrap();
    assert_eq!(bound.text, "IsSequenceOf[int]");
    assert_eq!(bound.tree.shape_key(), "IsSequenceOf[int]");
}

#[test]
fn test_non_predicate_bound_fails() {
    let literal = r#"{"T": "List[int]"}"#;
    let symbols = table_with_typevars(literal);
    let result = TypeVarTable::build(literal, &symbols);

    match result {
        Err(EngineError::MissingCapability { capability, .. }) => {
            assert_eq!(capability, Capability::BoundProducer);
        }
        other => panic!("Expected MissingCapability, got {other:?}"),
    }
}

#[test]
fn test_duplicate_variable_fails() {
    let literal = r#"{"T": None, "T": "IsOptional"}"#;
    let symbols = table_with_typevars(literal);
    let result = TypeVarTable::build(literal, &symbols);

    assert!(matches!(result, Err(EngineError::DuplicateSymbol { .. })));
}

#[test]
fn test_bound_with_unknown_symbol_fails() {
    let literal = r#"{"T": "IsSequenceOf[Missing]"}"#;
    let symbols = table_with_typevars(literal);
    let result = TypeVarTable::build(literal, &symbols);

    assert!(matches!(result, Err(EngineError::UnknownSymbol { .. })));
}

#[test]
fn test_declaration_order_preserved() {
    let literal = r#"{"T": None, "U": None, "V": None}"#;
    let symbols = table_with_typevars(literal);
    let bounds = TypeVarTable::build(literal, &symbols).unwrap();

    let names: Vec<&str> = bounds.names().collect();
    assert_eq!(names, vec!["T", "U", "V"]);
}
