//! Type-expression resolution and refinement engine
//!
//! This crate hosts the evaluation side of an out-of-process type service:
//! a static analysis engine serializes type expressions and table literals,
//! and the functions here parse them, resolve names against capability-
//! carrying entities, invoke type maps, and classify types with the
//! tri-state refinement algorithm.
//!
//! The two entry points mirror the service operations:
//! - [`map_type`] resolves a type map application and returns its rewrite
//! - [`refine_type`] classifies a target type against predicate expressions

pub mod builtins;
pub mod entity;
pub mod error;
pub mod refinement;
pub mod resolver;
pub mod symbol_table;
pub mod type_map;
pub mod typevar_table;

pub use entity::{Capability, EntityKind, PredicateFn, ResolvedEntity, TypeMapFn};
pub use error::{EngineError, TransformError};
pub use refinement::{
    EvalContext, Predicate, RefinementContext, RefinementEngine, RefinementStatus,
};
pub use resolver::{Resolution, ResolvedTypeFunction};
pub use symbol_table::SymbolTable;
pub use typevar_table::{ConstraintFunction, TypeVarTable};

use std::collections::HashMap;
use typeeval_parser::{parse_mapping_literal, parse_type_expr};

/// A refinement request: the target type plus predicate expression texts
#[derive(Debug, Clone)]
pub struct RefinementRequest {
    /// The type expression under refinement
    pub type_expr: String,
    /// Assumption predicates establishing preconditions, if any
    pub assumptions: Option<Vec<String>>,
    /// Test predicates, evaluated in order
    pub tests: Vec<String>,
}

/// Resolve `type_map_expr` against the symbol table and invoke its type map
///
/// Returns `None` when the root entity does not implement the type map
/// capability, leaving the original expression untouched.
pub fn map_type(
    type_map_expr: &str,
    symbol_table_expr: &str,
) -> Result<Option<String>, EngineError> {
    map_type_with(type_map_expr, symbol_table_expr, None)
}

/// [`map_type`] with a preresolved entity map for the symbol table fast path
pub fn map_type_with(
    type_map_expr: &str,
    symbol_table_expr: &str,
    preresolved: Option<&HashMap<String, ResolvedEntity>>,
) -> Result<Option<String>, EngineError> {
    let expr = parse_type_expr(type_map_expr)?;
    let table = SymbolTable::build(
        symbol_table_expr,
        preresolved,
        &builtins::standard_builtins(),
    )?;
    type_map::invoke_type_map(&expr, type_map_expr, &table)
}

/// Classify the request's target type against its assumption and test
/// predicates under the given symbol and typevar tables
pub fn refine_type(
    request: &RefinementRequest,
    symbol_table_expr: &str,
    typevar_table_expr: &str,
) -> Result<RefinementStatus, EngineError> {
    // Type variable names participate in expression resolution, so they are
    // injected as entities before the symbol table is built
    let typevar_literal = parse_mapping_literal(typevar_table_expr)?;
    let mut base_entities = builtins::standard_builtins();
    for entry in &typevar_literal.entries {
        base_entities.insert(entry.key.clone(), ResolvedEntity::type_var(&entry.key));
    }

    let table = SymbolTable::build(symbol_table_expr, None, &base_entities)?;
    let bounds = TypeVarTable::build(typevar_table_expr, &table)?;

    let target_expr = parse_type_expr(&request.type_expr)?;
    let target = resolver::resolve_tree(&target_expr, &request.type_expr, &table)?;

    let tests = resolve_predicate_list(&request.tests, &table)?;
    let assumptions = match &request.assumptions {
        Some(texts) => resolve_predicate_list(texts, &table)?,
        None => Vec::new(),
    };

    let mut engine = RefinementEngine::new(&bounds);
    engine.refine(&target, &assumptions, &tests)
}

fn resolve_predicate_list(
    texts: &[String],
    table: &SymbolTable,
) -> Result<Vec<Predicate>, EngineError> {
    let mut predicates = Vec::with_capacity(texts.len());
    for (index, text) in texts.iter().enumerate() {
        let predicate =
            resolve_predicate(text, table).map_err(|source| EngineError::PredicateContext {
                index,
                source: Box::new(source),
            })?;
        predicates.push(predicate);
    }
    Ok(predicates)
}

fn resolve_predicate(text: &str, table: &SymbolTable) -> Result<Predicate, EngineError> {
    let expr = parse_type_expr(text)?;
    let resolution = resolver::resolve(&expr, text, table, Capability::RefinementPredicate)?;
    Ok(Predicate {
        text: text.to_string(),
        tree: resolution.tree,
    })
}

#[cfg(test)]
mod tests;
