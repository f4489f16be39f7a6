//! Error types for the evaluation engine
//!
//! Following the miette patterns from the parser for consistent error reporting.
//! Every failure carries enough context (offending text, symbol name, or
//! predicate index) for the calling analysis engine to attribute it to a
//! specific user-authored type map or predicate.

use crate::entity::Capability;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;
use typeeval_parser::{ParseError, Span};

/// Main engine error type extending the parser error system
#[derive(Error, Diagnostic, Debug)]
pub enum EngineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] ParseError),

    #[error("Unknown symbol `{name}`")]
    #[diagnostic(
        code(typeeval::engine::unknown_symbol),
        help("The name must be a builtin or defined in the symbol table")
    )]
    UnknownSymbol {
        name: String,
        #[source_code]
        src: String,
        #[label("not found in the symbol table")]
        span: SourceSpan,
    },

    #[error("Duplicate symbol `{name}` in table literal")]
    #[diagnostic(
        code(typeeval::engine::duplicate_symbol),
        help("Each name may be defined at most once; duplicate entries are never merged")
    )]
    DuplicateSymbol {
        name: String,
        #[source_code]
        src: String,
        #[label("redefined here")]
        span: SourceSpan,
    },

    #[error("Unresolved symbol `{name}` while building table entry `{entry}`")]
    #[diagnostic(
        code(typeeval::engine::unresolved_symbol),
        help("Entries may reference builtins and earlier entries only; forward references never resolve")
    )]
    UnresolvedSymbol { name: String, entry: String },

    #[error("Entity `{name}` does not implement the {capability} capability")]
    #[diagnostic(code(typeeval::engine::missing_capability))]
    MissingCapability { name: String, capability: Capability },

    #[error("Cyclic self-referential refinement of `{shape}` under `{predicate}`")]
    #[diagnostic(
        code(typeeval::engine::refinement_cycle),
        help("The predicate re-entered the same (type, predicate) pair before its first evaluation completed")
    )]
    RefinementCycle { shape: String, predicate: String },

    #[error("Type map `{name}` failed to rewrite its input: {reason}")]
    #[diagnostic(code(typeeval::engine::transform_failure))]
    TransformFailure { name: String, reason: String },

    #[error("Cannot apply type arguments to `{text}`")]
    #[diagnostic(
        code(typeeval::engine::invalid_application),
        help("Only names resolving to type constructors accept subscript arguments")
    )]
    InvalidApplication { text: String },

    #[error("Invalid definition for symbol `{name}`: {reason}")]
    #[diagnostic(code(typeeval::engine::invalid_definition))]
    InvalidDefinition { name: String, reason: String },

    #[error("Predicate `{name}` expects {expected} argument(s), found {found}")]
    #[diagnostic(code(typeeval::engine::predicate_arity))]
    PredicateArity {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("While evaluating predicate #{index}")]
    #[diagnostic(code(typeeval::engine::predicate_context))]
    PredicateContext {
        index: usize,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Unwrap predicate-index context, yielding the underlying failure
    pub fn root_cause(&self) -> &EngineError {
        match self {
            EngineError::PredicateContext { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Error raised by a type map's own rewrite logic; wrapped into
/// [`EngineError::TransformFailure`] at the invocation boundary
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TransformError {
    pub message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Helper for creating source spans from parser spans
pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}
