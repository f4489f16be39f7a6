//! Resolved entities and their capability contracts
//!
//! A resolved entity is the engine's handle for anything a name can denote:
//! a type constructor, the self marker, or a type variable. Capabilities are
//! duck-typed: an entity implements a capability exactly when it carries the
//! corresponding behaviour, and callers check `implements` instead of
//! downcasting.

use crate::error::{EngineError, TransformError};
use crate::refinement::{EvalContext, RefinementStatus};
use crate::resolver::ResolvedTypeFunction;
use std::fmt;
use std::sync::Arc;

/// Behavioural contracts an entity may satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Rewrites a resolved application into a new type expression
    TypeMap,
    /// Classifies a target type during refinement
    RefinementPredicate,
    /// May appear as the bound of a type variable
    BoundProducer,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::TypeMap => write!(f, "TypeMap"),
            Capability::RefinementPredicate => write!(f, "RefinementPredicate"),
            Capability::BoundProducer => write!(f, "BoundProducer"),
        }
    }
}

/// Rewrite behaviour for entities implementing [`Capability::TypeMap`]
pub trait TypeMapFn: Send + Sync {
    /// Rewrite a fully resolved application of this entity into the
    /// canonical text of the replacement type expression
    fn map_type(
        &self,
        call: &ResolvedTypeFunction,
        original: &str,
    ) -> Result<String, TransformError>;
}

impl<F> TypeMapFn for F
where
    F: Fn(&ResolvedTypeFunction, &str) -> Result<String, TransformError> + Send + Sync,
{
    fn map_type(
        &self,
        call: &ResolvedTypeFunction,
        original: &str,
    ) -> Result<String, TransformError> {
        self(call, original)
    }
}

/// Classification behaviour for entities implementing
/// [`Capability::RefinementPredicate`] (and, via the same function,
/// [`Capability::BoundProducer`])
pub trait PredicateFn: Send + Sync {
    /// Classify `target` against this predicate applied to `args`
    fn evaluate(
        &self,
        args: &[ResolvedTypeFunction],
        target: &ResolvedTypeFunction,
        ctx: &mut EvalContext<'_, '_>,
    ) -> Result<RefinementStatus, EngineError>;

    /// The binding this predicate pins an unbound type variable to when it
    /// appears as an assumption; `None` records the predicate as an assumed
    /// bound instead
    fn binds_to(&self, _args: &[ResolvedTypeFunction]) -> Option<ResolvedTypeFunction> {
        None
    }
}

/// What kind of thing a name denotes once resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// An ordinary type constructor such as `List` or a user alias
    Constructor,
    /// The self-reference marker usable inside recursive predicates
    SelfMarker,
    /// A type variable introduced by the typevar table
    TypeVar,
}

struct EntityDef {
    name: String,
    kind: EntityKind,
    type_map: Option<Arc<dyn TypeMapFn>>,
    predicate: Option<Arc<dyn PredicateFn>>,
}

/// Shared handle to a resolved entity
///
/// Cloning is cheap; equality compares name and kind, while `same_handle`
/// tests for the identical underlying definition (used by the preresolved
/// fast path).
#[derive(Clone)]
pub struct ResolvedEntity(Arc<EntityDef>);

impl ResolvedEntity {
    pub fn constructor(name: impl Into<String>) -> Self {
        Self(Arc::new(EntityDef {
            name: name.into(),
            kind: EntityKind::Constructor,
            type_map: None,
            predicate: None,
        }))
    }

    pub fn self_marker() -> Self {
        Self(Arc::new(EntityDef {
            name: "This".to_string(),
            kind: EntityKind::SelfMarker,
            type_map: None,
            predicate: None,
        }))
    }

    pub fn type_var(name: impl Into<String>) -> Self {
        Self(Arc::new(EntityDef {
            name: name.into(),
            kind: EntityKind::TypeVar,
            type_map: None,
            predicate: None,
        }))
    }

    pub fn with_type_map(name: impl Into<String>, type_map: Arc<dyn TypeMapFn>) -> Self {
        Self(Arc::new(EntityDef {
            name: name.into(),
            kind: EntityKind::Constructor,
            type_map: Some(type_map),
            predicate: None,
        }))
    }

    pub fn with_predicate(name: impl Into<String>, predicate: Arc<dyn PredicateFn>) -> Self {
        Self(Arc::new(EntityDef {
            name: name.into(),
            kind: EntityKind::Constructor,
            type_map: None,
            predicate: Some(predicate),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> EntityKind {
        self.0.kind
    }

    /// Duck-typed capability check: the entity implements a capability
    /// exactly when it carries the matching behaviour
    pub fn implements(&self, capability: Capability) -> bool {
        match capability {
            Capability::TypeMap => self.0.type_map.is_some(),
            Capability::RefinementPredicate | Capability::BoundProducer => {
                self.0.predicate.is_some()
            }
        }
    }

    pub fn type_map(&self) -> Option<&dyn TypeMapFn> {
        self.0.type_map.as_deref()
    }

    pub fn predicate(&self) -> Option<&dyn PredicateFn> {
        self.0.predicate.as_deref()
    }

    /// Identity comparison for the preresolved fast path
    pub fn same_handle(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ResolvedEntity {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name && self.0.kind == other.0.kind
    }
}

impl Eq for ResolvedEntity {}

impl fmt::Debug for ResolvedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedEntity")
            .field("name", &self.0.name)
            .field("kind", &self.0.kind)
            .field("type_map", &self.0.type_map.is_some())
            .field("predicate", &self.0.predicate.is_some())
            .finish()
    }
}

impl fmt::Display for ResolvedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}
