//! Symbol table construction from serialized mapping literals
//!
//! The table is ordered: entries resolve strictly in the literal's written
//! order against the builtins plus everything defined before them. A
//! preresolved map supplies entities for names the caller has already
//! resolved in-process, skipping expression parsing entirely for those.

use crate::builtins;
use crate::entity::ResolvedEntity;
use crate::error::{to_source_span, EngineError};
use crate::resolver;
use indexmap::IndexMap;
use std::collections::HashMap;
use typeeval_parser::{parse_mapping_literal, parse_type_expr, MappingValue};

/// Ordered name-to-entity table backing resolution
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: IndexMap<String, ResolvedEntity>,
}

impl SymbolTable {
    /// A table holding only the standard builtins
    pub fn standard() -> Self {
        Self {
            entries: builtins::standard_builtins(),
        }
    }

    /// Build a table from a serialized mapping literal on top of `builtins`
    ///
    /// `preresolved` entries take the fast path: their entity is adopted
    /// verbatim and the serialized definition text is never parsed.
    pub fn build(
        text: &str,
        preresolved: Option<&HashMap<String, ResolvedEntity>>,
        builtins: &IndexMap<String, ResolvedEntity>,
    ) -> Result<Self, EngineError> {
        let literal = parse_mapping_literal(text)?;
        let mut table = Self {
            entries: builtins.clone(),
        };

        for entry in &literal.entries {
            if table.entries.contains_key(&entry.key) {
                return Err(EngineError::DuplicateSymbol {
                    name: entry.key.clone(),
                    src: text.to_string(),
                    span: to_source_span(entry.key_span),
                });
            }

            if let Some(entity) = preresolved.and_then(|map| map.get(&entry.key)) {
                table.entries.insert(entry.key.clone(), entity.clone());
                continue;
            }

            let expr_text = match &entry.value {
                MappingValue::Expr { text, .. } => text,
                MappingValue::None { .. } => {
                    return Err(EngineError::InvalidDefinition {
                        name: entry.key.clone(),
                        reason: "symbol definitions must be type expressions, not None".to_string(),
                    })
                }
            };

            let expr = parse_type_expr(expr_text)?;
            let tree = resolver::resolve_tree(&expr, expr_text, &table).map_err(|error| {
                match error {
                    // Lookup failures during construction mean the entry
                    // referenced something not yet (or never) defined
                    EngineError::UnknownSymbol { name, .. } => EngineError::UnresolvedSymbol {
                        name,
                        entry: entry.key.clone(),
                    },
                    other => other,
                }
            })?;

            let entity = match tree.base_entity() {
                Some(entity) => entity.clone(),
                None => {
                    return Err(EngineError::InvalidDefinition {
                        name: entry.key.clone(),
                        reason: format!("`{tree}` does not name a type constructor"),
                    })
                }
            };
            table.entries.insert(entry.key.clone(), entity);
        }

        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedEntity> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
