//! Tri-state refinement evaluation with memoisation and cycle detection
//!
//! A refinement run folds assumption predicates into the evaluation context
//! first, then folds test predicates over the target. Statuses combine with
//! the precedence NotRefined > Unknown > Refined: one failing test decides
//! the run, while an indeterminate test only downgrades it.
//!
//! Recursive predicates re-enter the engine through [`EvalContext::recurse`],
//! which memoises on the (canonical target text, predicate text) pair and
//! reports re-entry of an in-flight pair as a cycle.

use crate::error::EngineError;
use crate::resolver::ResolvedTypeFunction;
use crate::typevar_table::TypeVarTable;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Outcome of evaluating a predicate against a type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementStatus {
    /// The type definitely satisfies the predicate
    Refined,
    /// The type definitely does not satisfy the predicate
    NotRefined,
    /// Satisfaction cannot be decided with the available information
    Unknown,
}

impl RefinementStatus {
    /// Combine two statuses that must both hold
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (RefinementStatus::NotRefined, _) | (_, RefinementStatus::NotRefined) => {
                RefinementStatus::NotRefined
            }
            (RefinementStatus::Unknown, _) | (_, RefinementStatus::Unknown) => {
                RefinementStatus::Unknown
            }
            _ => RefinementStatus::Refined,
        }
    }

    /// Combine two statuses of which at least one must hold
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (RefinementStatus::Refined, _) | (_, RefinementStatus::Refined) => {
                RefinementStatus::Refined
            }
            (RefinementStatus::Unknown, _) | (_, RefinementStatus::Unknown) => {
                RefinementStatus::Unknown
            }
            _ => RefinementStatus::NotRefined,
        }
    }
}

impl fmt::Display for RefinementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefinementStatus::Refined => write!(f, "Refined"),
            RefinementStatus::NotRefined => write!(f, "NotRefined"),
            RefinementStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A resolved predicate expression together with its original text, which
/// doubles as half of the memoisation key
#[derive(Debug, Clone)]
pub struct Predicate {
    pub text: String,
    pub tree: ResolvedTypeFunction,
}

/// Mutable state accumulated while a refinement runs: type variable bindings
/// pinned by assumptions, plus predicate shapes assumed to hold for
/// still-unbound variables
#[derive(Debug, Clone, Default)]
pub struct RefinementContext {
    bindings: IndexMap<String, ResolvedTypeFunction>,
    assumed: IndexMap<String, Vec<String>>,
}

impl RefinementContext {
    pub fn binding(&self, name: &str) -> Option<&ResolvedTypeFunction> {
        self.bindings.get(name)
    }

    pub fn bind(&mut self, name: String, tree: ResolvedTypeFunction) {
        self.bindings.insert(name, tree);
    }

    pub fn assume(&mut self, name: String, shape_key: String) {
        self.assumed.entry(name).or_default().push(shape_key);
    }

    pub fn assumed(&self, name: &str) -> &[String] {
        self.assumed.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

type MemoKey = (String, String);

#[derive(Debug, Default)]
struct MemoCache {
    results: HashMap<MemoKey, RefinementStatus>,
    in_flight: HashSet<MemoKey>,
}

/// Evaluates predicates against a target type under a set of type variable
/// bounds
pub struct RefinementEngine<'a> {
    bounds: &'a TypeVarTable,
    context: RefinementContext,
    cache: MemoCache,
}

impl<'a> RefinementEngine<'a> {
    pub fn new(bounds: &'a TypeVarTable) -> Self {
        Self {
            bounds,
            context: RefinementContext::default(),
            cache: MemoCache::default(),
        }
    }

    /// Run a full refinement: assumptions first, then tests in order
    pub fn refine(
        &mut self,
        target: &ResolvedTypeFunction,
        assumptions: &[Predicate],
        tests: &[Predicate],
    ) -> Result<RefinementStatus, EngineError> {
        for (index, assumption) in assumptions.iter().enumerate() {
            let status = self
                .dispatch(&assumption.tree, &assumption.text, target, true)
                .map_err(|source| EngineError::PredicateContext {
                    index,
                    source: Box::new(source),
                })?;
            // An assumption the target cannot satisfy leaves nothing to
            // decide against
            if status == RefinementStatus::NotRefined {
                return Ok(RefinementStatus::Unknown);
            }
        }

        let mut overall = RefinementStatus::Refined;
        for (index, test) in tests.iter().enumerate() {
            let status = self
                .evaluate_memoized(&test.tree, &test.text, target)
                .map_err(|source| EngineError::PredicateContext {
                    index,
                    source: Box::new(source),
                })?;
            match status {
                RefinementStatus::NotRefined => return Ok(RefinementStatus::NotRefined),
                RefinementStatus::Unknown => overall = RefinementStatus::Unknown,
                RefinementStatus::Refined => {}
            }
        }
        Ok(overall)
    }

    /// Bindings and assumed bounds accumulated during the run
    pub fn context(&self) -> &RefinementContext {
        &self.context
    }

    /// Number of distinct (target, predicate) pairs evaluated so far
    pub fn memo_size(&self) -> usize {
        self.cache.results.len()
    }

    fn evaluate_memoized(
        &mut self,
        predicate_tree: &ResolvedTypeFunction,
        predicate_text: &str,
        target: &ResolvedTypeFunction,
    ) -> Result<RefinementStatus, EngineError> {
        let key = (target.shape_key(), predicate_text.to_string());
        if let Some(status) = self.cache.results.get(&key) {
            return Ok(*status);
        }
        if !self.cache.in_flight.insert(key.clone()) {
            return Err(EngineError::RefinementCycle {
                shape: key.0,
                predicate: key.1,
            });
        }
        let result = self.dispatch(predicate_tree, predicate_text, target, false);
        self.cache.in_flight.remove(&key);
        let status = result?;
        self.cache.results.insert(key, status);
        Ok(status)
    }

    fn dispatch(
        &mut self,
        predicate_tree: &ResolvedTypeFunction,
        predicate_text: &str,
        target: &ResolvedTypeFunction,
        assuming: bool,
    ) -> Result<RefinementStatus, EngineError> {
        let ResolvedTypeFunction::Entity { base, args } = predicate_tree else {
            return Err(EngineError::MissingCapability {
                name: predicate_tree.to_string(),
                capability: crate::entity::Capability::RefinementPredicate,
            });
        };
        let Some(predicate) = base.predicate() else {
            return Err(EngineError::MissingCapability {
                name: base.name().to_string(),
                capability: crate::entity::Capability::RefinementPredicate,
            });
        };

        if let ResolvedTypeFunction::TypeVar { name } = target {
            if let Some(binding) = self.context.binding(name).cloned() {
                return self.dispatch(predicate_tree, predicate_text, &binding, assuming);
            }
            if assuming {
                match predicate.binds_to(args) {
                    Some(bound_to) => self.context.bind(name.clone(), bound_to),
                    None => self.context.assume(name.clone(), predicate_tree.shape_key()),
                }
                return Ok(RefinementStatus::Refined);
            }
            if self.bound_matches(name, &predicate_tree.shape_key()) {
                return Ok(RefinementStatus::Refined);
            }
            return Ok(RefinementStatus::Unknown);
        }

        let mut ctx = EvalContext {
            engine: self,
            predicate_tree,
            predicate_text,
            assuming,
        };
        predicate.evaluate(args, target, &mut ctx)
    }

    fn bound_matches(&self, name: &str, shape_key: &str) -> bool {
        if let Some(Some(bound)) = self.bounds.bound(name) {
            if bound.tree.shape_key() == shape_key {
                return true;
            }
        }
        self.context
            .assumed(name)
            .iter()
            .any(|assumed| assumed == shape_key)
    }
}

/// Evaluation hooks handed to predicate implementations
pub struct EvalContext<'e, 'a> {
    engine: &'e mut RefinementEngine<'a>,
    predicate_tree: &'e ResolvedTypeFunction,
    predicate_text: &'e str,
    assuming: bool,
}

impl EvalContext<'_, '_> {
    /// Re-enter the current predicate against a nested target, memoised
    /// and cycle-checked
    pub fn recurse(
        &mut self,
        sub_target: &ResolvedTypeFunction,
    ) -> Result<RefinementStatus, EngineError> {
        self.engine
            .evaluate_memoized(self.predicate_tree, self.predicate_text, sub_target)
    }

    /// Re-dispatch the current predicate against a different target without
    /// the memo layer, keeping type variable handling in one place
    pub fn evaluate_self(
        &mut self,
        target: &ResolvedTypeFunction,
    ) -> Result<RefinementStatus, EngineError> {
        self.engine
            .dispatch(self.predicate_tree, self.predicate_text, target, self.assuming)
    }

    /// Whether this evaluation establishes an assumption rather than
    /// answering a test
    pub fn is_assuming(&self) -> bool {
        self.assuming
    }

    /// Structural satisfaction of `actual` against `expected`
    ///
    /// `This` in the expected position recurses the current predicate; type
    /// variables resolve through bindings, bind under assumptions, and stay
    /// Unknown otherwise.
    pub fn satisfies(
        &mut self,
        expected: &ResolvedTypeFunction,
        actual: &ResolvedTypeFunction,
    ) -> Result<RefinementStatus, EngineError> {
        use ResolvedTypeFunction as Tree;

        match (expected, actual) {
            (Tree::SelfMarker, _) => self.recurse(actual),
            (_, Tree::TypeVar { name }) => {
                if let Some(binding) = self.engine.context.binding(name).cloned() {
                    self.satisfies(expected, &binding)
                } else if self.assuming {
                    self.engine.context.bind(name.clone(), expected.clone());
                    Ok(RefinementStatus::Refined)
                } else {
                    Ok(RefinementStatus::Unknown)
                }
            }
            (Tree::TypeVar { name }, _) => {
                if let Some(binding) = self.engine.context.binding(name).cloned() {
                    self.satisfies(&binding, actual)
                } else {
                    Ok(RefinementStatus::Unknown)
                }
            }
            (Tree::NoneType, Tree::NoneType) => Ok(RefinementStatus::Refined),
            (
                Tree::Entity {
                    base: expected_base,
                    args: expected_args,
                },
                Tree::Entity {
                    base: actual_base,
                    args: actual_args,
                },
            ) => {
                if expected_base.name() != actual_base.name() {
                    return Ok(RefinementStatus::NotRefined);
                }
                if expected_args.len() != actual_args.len() {
                    // A bare constructor against a parameterized one is
                    // indeterminate, not a mismatch
                    if expected_args.is_empty() || actual_args.is_empty() {
                        return Ok(RefinementStatus::Unknown);
                    }
                    return Ok(RefinementStatus::NotRefined);
                }
                let mut status = RefinementStatus::Refined;
                for (e, a) in expected_args.iter().zip(actual_args) {
                    status = status.and(self.satisfies(e, a)?);
                    if status == RefinementStatus::NotRefined {
                        break;
                    }
                }
                Ok(status)
            }
            (Tree::Union { members }, _) if !matches!(actual, Tree::Union { .. }) => {
                // The actual type must satisfy at least one alternative
                let mut best = RefinementStatus::NotRefined;
                for member in members {
                    best = best.or(self.satisfies(member, actual)?);
                    if best == RefinementStatus::Refined {
                        break;
                    }
                }
                Ok(best)
            }
            (_, Tree::Union { members }) => {
                // Every alternative of the actual type must satisfy the
                // expected one
                let mut status = RefinementStatus::Refined;
                for member in members {
                    status = status.and(self.satisfies(expected, member)?);
                    if status == RefinementStatus::NotRefined {
                        break;
                    }
                }
                Ok(status)
            }
            _ => Ok(RefinementStatus::NotRefined),
        }
    }
}
