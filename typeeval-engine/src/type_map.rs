//! Type map invocation
//!
//! Resolves a type map expression and, when the root entity implements the
//! type map capability, asks it to rewrite the application. A root without
//! the capability is a no-op rather than an error: the calling analysis
//! engine treats `None` as "leave the original expression alone".

use crate::entity::Capability;
use crate::error::EngineError;
use crate::resolver;
use crate::symbol_table::SymbolTable;
use typeeval_parser::TypeExpr;

/// Invoke the type map named by `expr`, returning the rewritten expression
/// text or `None` when the root entity is not a type map
pub fn invoke_type_map(
    expr: &TypeExpr,
    src: &str,
    table: &SymbolTable,
) -> Result<Option<String>, EngineError> {
    let resolution = resolver::resolve(expr, src, table, Capability::TypeMap)?;
    if !resolution.satisfies_expected {
        return Ok(None);
    }
    // satisfies_expected implies an entity root with a type map attached
    let Some(base) = resolution.tree.base_entity() else {
        return Ok(None);
    };
    let Some(type_map) = base.type_map() else {
        return Ok(None);
    };
    let rewritten = type_map
        .map_type(&resolution.tree, src)
        .map_err(|error| EngineError::TransformFailure {
            name: base.name().to_string(),
            reason: error.message,
        })?;
    Ok(Some(rewritten))
}
