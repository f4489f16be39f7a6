//! Name resolution from parsed type expressions to resolved type functions
//!
//! Resolution walks the syntax tree, replaces every name with its symbol
//! table entity, and records whether the root satisfies the capability the
//! caller expects. The check is permissive here: callers decide whether a
//! missing capability is an error or a no-op.

use crate::entity::{Capability, EntityKind, ResolvedEntity};
use crate::error::{to_source_span, EngineError};
use crate::symbol_table::SymbolTable;
use std::fmt;
use typeeval_parser::{TypeExpr, TypeExprKind};

/// A fully resolved type expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTypeFunction {
    /// An entity, optionally applied to arguments; a bare name resolves to
    /// an entity with no arguments
    Entity {
        base: ResolvedEntity,
        args: Vec<ResolvedTypeFunction>,
    },
    /// An ordered union of alternatives
    Union { members: Vec<ResolvedTypeFunction> },
    /// The `None` singleton type
    NoneType,
    /// The self-reference marker inside a recursive predicate
    SelfMarker,
    /// An unbound type variable
    TypeVar { name: String },
}

impl ResolvedTypeFunction {
    /// The root entity, when the tree is an entity application
    pub fn base_entity(&self) -> Option<&ResolvedEntity> {
        match self {
            ResolvedTypeFunction::Entity { base, .. } => Some(base),
            _ => None,
        }
    }

    /// Canonical text of this tree, used as the memoisation key component
    pub fn shape_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResolvedTypeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedTypeFunction::Entity { base, args } => {
                write!(f, "{}", base.name())?;
                if !args.is_empty() {
                    write!(f, "[")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, "]")?;
                }
                Ok(())
            }
            ResolvedTypeFunction::Union { members } => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            ResolvedTypeFunction::NoneType => write!(f, "None"),
            ResolvedTypeFunction::SelfMarker => write!(f, "This"),
            ResolvedTypeFunction::TypeVar { name } => write!(f, "{name}"),
        }
    }
}

/// Result of resolving an expression against an expected capability
#[derive(Debug, Clone)]
pub struct Resolution {
    pub tree: ResolvedTypeFunction,
    /// Whether the root entity implements the capability the caller asked
    /// for; the caller decides what a `false` means
    pub satisfies_expected: bool,
}

/// Resolve `expr` against `table`, checking the root for `expected`
pub fn resolve(
    expr: &TypeExpr,
    src: &str,
    table: &SymbolTable,
    expected: Capability,
) -> Result<Resolution, EngineError> {
    let tree = resolve_tree(expr, src, table)?;
    let satisfies_expected = tree
        .base_entity()
        .map(|entity| entity.implements(expected))
        .unwrap_or(false);
    Ok(Resolution {
        tree,
        satisfies_expected,
    })
}

/// Resolve an expression tree without any capability expectation
pub(crate) fn resolve_tree(
    expr: &TypeExpr,
    src: &str,
    table: &SymbolTable,
) -> Result<ResolvedTypeFunction, EngineError> {
    match &expr.kind {
        TypeExprKind::Name(name) => match table.get(&name.name) {
            Some(entity) => Ok(match entity.kind() {
                EntityKind::SelfMarker => ResolvedTypeFunction::SelfMarker,
                EntityKind::TypeVar => ResolvedTypeFunction::TypeVar {
                    name: name.name.clone(),
                },
                EntityKind::Constructor => ResolvedTypeFunction::Entity {
                    base: entity.clone(),
                    args: Vec::new(),
                },
            }),
            None => Err(EngineError::UnknownSymbol {
                name: name.name.clone(),
                src: src.to_string(),
                span: to_source_span(name.span),
            }),
        },
        TypeExprKind::NoneLiteral => Ok(ResolvedTypeFunction::NoneType),
        TypeExprKind::Union { members } => {
            let members = members
                .iter()
                .map(|member| resolve_tree(member, src, table))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ResolvedTypeFunction::Union { members })
        }
        TypeExprKind::Application { base, args } => {
            let base_tree = resolve_tree(base, src, table)?;
            let resolved_args = args
                .iter()
                .map(|arg| resolve_tree(arg, src, table))
                .collect::<Result<Vec<_>, _>>()?;
            match base_tree {
                ResolvedTypeFunction::Entity {
                    base,
                    args: mut existing,
                } => {
                    // Chained subscripts accumulate onto the same entity
                    existing.extend(resolved_args);
                    Ok(ResolvedTypeFunction::Entity {
                        base,
                        args: existing,
                    })
                }
                other => Err(EngineError::InvalidApplication {
                    text: other.to_string(),
                }),
            }
        }
    }
}
