//! Type variable bounds parsed from serialized mapping literals
//!
//! Every key introduces a type variable; a `None` value leaves it
//! unconstrained, while an expression value must resolve to an entity
//! implementing the bound-producer capability. Unlike resolution elsewhere,
//! the capability check here is strict.

use crate::entity::Capability;
use crate::error::{to_source_span, EngineError};
use crate::refinement::Predicate;
use crate::resolver;
use crate::symbol_table::SymbolTable;
use indexmap::IndexMap;
use typeeval_parser::{parse_mapping_literal, parse_type_expr, MappingValue};

/// A resolved bound for a type variable
pub type ConstraintFunction = Predicate;

/// Ordered table of type variables and their optional bounds
#[derive(Debug, Clone, Default)]
pub struct TypeVarTable {
    entries: IndexMap<String, Option<ConstraintFunction>>,
}

impl TypeVarTable {
    /// Build the table from a serialized mapping literal, resolving bound
    /// expressions against `table`
    pub fn build(text: &str, table: &SymbolTable) -> Result<Self, EngineError> {
        let literal = parse_mapping_literal(text)?;
        let mut entries: IndexMap<String, Option<ConstraintFunction>> = IndexMap::new();

        for entry in &literal.entries {
            if entries.contains_key(&entry.key) {
                return Err(EngineError::DuplicateSymbol {
                    name: entry.key.clone(),
                    src: text.to_string(),
                    span: to_source_span(entry.key_span),
                });
            }

            match &entry.value {
                MappingValue::None { .. } => {
                    entries.insert(entry.key.clone(), None);
                }
                MappingValue::Expr {
                    text: expr_text, ..
                } => {
                    let expr = parse_type_expr(expr_text)?;
                    let resolution =
                        resolver::resolve(&expr, expr_text, table, Capability::BoundProducer)?;
                    if !resolution.satisfies_expected {
                        return Err(EngineError::MissingCapability {
                            name: resolution.tree.to_string(),
                            capability: Capability::BoundProducer,
                        });
                    }
                    entries.insert(
                        entry.key.clone(),
                        Some(Predicate {
                            text: expr_text.clone(),
                            tree: resolution.tree,
                        }),
                    );
                }
            }
        }

        Ok(Self { entries })
    }

    /// The bound for `name`: `None` if the variable is unknown, `Some(None)`
    /// if it is declared without a constraint
    pub fn bound(&self, name: &str) -> Option<&Option<ConstraintFunction>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
