//! The standard entity catalogue
//!
//! Every table starts from these: the ordinary constructors, the `This`
//! self marker, the `Map` type map, and the refinement predicates. The
//! predicates also serve as bound producers for type variable tables.

use crate::entity::{PredicateFn, ResolvedEntity, TypeMapFn};
use crate::error::{EngineError, TransformError};
use crate::refinement::{EvalContext, RefinementStatus};
use crate::resolver::ResolvedTypeFunction;
use indexmap::IndexMap;
use std::sync::Arc;

const CONSTRUCTORS: &[&str] = &[
    "int", "str", "bool", "float", "bytes", "object", "type", "List", "Dict", "Set", "Tuple",
    "Sequence", "Mapping", "Optional",
];

/// Build the standard builtin table
pub fn standard_builtins() -> IndexMap<String, ResolvedEntity> {
    let mut table = IndexMap::new();
    for name in CONSTRUCTORS {
        table.insert(name.to_string(), ResolvedEntity::constructor(*name));
    }
    table.insert("This".to_string(), ResolvedEntity::self_marker());
    table.insert(
        "Map".to_string(),
        ResolvedEntity::with_type_map("Map", Arc::new(MapTypeMap)),
    );
    table.insert(
        "IsSequenceOf".to_string(),
        ResolvedEntity::with_predicate("IsSequenceOf", Arc::new(IsSequenceOf)),
    );
    table.insert(
        "IsMappingOf".to_string(),
        ResolvedEntity::with_predicate("IsMappingOf", Arc::new(IsMappingOf)),
    );
    table.insert(
        "IsOptional".to_string(),
        ResolvedEntity::with_predicate("IsOptional", Arc::new(IsOptional)),
    );
    table.insert(
        "IsExactly".to_string(),
        ResolvedEntity::with_predicate("IsExactly", Arc::new(IsExactly)),
    );
    table.insert(
        "IsConstructedFrom".to_string(),
        ResolvedEntity::with_predicate("IsConstructedFrom", Arc::new(IsConstructedFrom)),
    );
    table
}

fn expect_arity(
    name: &str,
    expected: usize,
    args: &[ResolvedTypeFunction],
) -> Result<(), EngineError> {
    if args.len() != expected {
        return Err(EngineError::PredicateArity {
            name: name.to_string(),
            expected,
            found: args.len(),
        });
    }
    Ok(())
}

/// `Map[F, X1, .., Xn]` rewrites to `Tuple[F[X1], .., F[Xn]]`
struct MapTypeMap;

impl TypeMapFn for MapTypeMap {
    fn map_type(
        &self,
        call: &ResolvedTypeFunction,
        _original: &str,
    ) -> Result<String, TransformError> {
        let ResolvedTypeFunction::Entity { args, .. } = call else {
            return Err(TransformError::new("Map must be applied to arguments"));
        };
        let Some((mapper, operands)) = args.split_first() else {
            return Err(TransformError::new(
                "Map requires a mapping function and at least one operand",
            ));
        };
        if operands.is_empty() {
            return Err(TransformError::new(
                "Map requires at least one operand after the mapping function",
            ));
        }
        let elements: Vec<String> = operands
            .iter()
            .map(|operand| format!("{mapper}[{operand}]"))
            .collect();
        Ok(format!("Tuple[{}]", elements.join(", ")))
    }
}

fn is_sequence_constructor(name: &str) -> bool {
    matches!(name, "List" | "Sequence" | "Set" | "Tuple")
}

fn is_mapping_constructor(name: &str) -> bool {
    matches!(name, "Dict" | "Mapping")
}

/// `IsSequenceOf[E]`: every element type of a sequence satisfies `E`
struct IsSequenceOf;

impl PredicateFn for IsSequenceOf {
    fn evaluate(
        &self,
        args: &[ResolvedTypeFunction],
        target: &ResolvedTypeFunction,
        ctx: &mut EvalContext<'_, '_>,
    ) -> Result<RefinementStatus, EngineError> {
        expect_arity("IsSequenceOf", 1, args)?;
        let element = &args[0];
        match target {
            ResolvedTypeFunction::Entity { base, args: targs }
                if is_sequence_constructor(base.name()) =>
            {
                if targs.is_empty() {
                    // Unparameterized sequence, element type unknown
                    return Ok(RefinementStatus::Unknown);
                }
                let mut status = RefinementStatus::Refined;
                for targ in targs {
                    status = status.and(ctx.satisfies(element, targ)?);
                    if status == RefinementStatus::NotRefined {
                        break;
                    }
                }
                Ok(status)
            }
            ResolvedTypeFunction::Union { members } => {
                let mut status = RefinementStatus::Refined;
                for member in members {
                    status = status.and(ctx.evaluate_self(member)?);
                    if status == RefinementStatus::NotRefined {
                        break;
                    }
                }
                Ok(status)
            }
            ResolvedTypeFunction::Entity { .. } | ResolvedTypeFunction::NoneType => {
                Ok(RefinementStatus::NotRefined)
            }
            _ => Ok(RefinementStatus::Unknown),
        }
    }
}

/// `IsMappingOf[K, V]`: a mapping's key and value types satisfy `K` and `V`
struct IsMappingOf;

impl PredicateFn for IsMappingOf {
    fn evaluate(
        &self,
        args: &[ResolvedTypeFunction],
        target: &ResolvedTypeFunction,
        ctx: &mut EvalContext<'_, '_>,
    ) -> Result<RefinementStatus, EngineError> {
        expect_arity("IsMappingOf", 2, args)?;
        match target {
            ResolvedTypeFunction::Entity { base, args: targs }
                if is_mapping_constructor(base.name()) =>
            {
                if targs.is_empty() {
                    return Ok(RefinementStatus::Unknown);
                }
                if targs.len() != 2 {
                    return Ok(RefinementStatus::NotRefined);
                }
                let keys = ctx.satisfies(&args[0], &targs[0])?;
                if keys == RefinementStatus::NotRefined {
                    return Ok(RefinementStatus::NotRefined);
                }
                let values = ctx.satisfies(&args[1], &targs[1])?;
                Ok(keys.and(values))
            }
            ResolvedTypeFunction::Union { members } => {
                let mut status = RefinementStatus::Refined;
                for member in members {
                    status = status.and(ctx.evaluate_self(member)?);
                    if status == RefinementStatus::NotRefined {
                        break;
                    }
                }
                Ok(status)
            }
            ResolvedTypeFunction::Entity { .. } | ResolvedTypeFunction::NoneType => {
                Ok(RefinementStatus::NotRefined)
            }
            _ => Ok(RefinementStatus::Unknown),
        }
    }
}

/// `IsOptional`: the type admits `None`
struct IsOptional;

impl PredicateFn for IsOptional {
    fn evaluate(
        &self,
        args: &[ResolvedTypeFunction],
        target: &ResolvedTypeFunction,
        _ctx: &mut EvalContext<'_, '_>,
    ) -> Result<RefinementStatus, EngineError> {
        expect_arity("IsOptional", 0, args)?;
        match target {
            ResolvedTypeFunction::NoneType => Ok(RefinementStatus::Refined),
            ResolvedTypeFunction::Union { members } => {
                if members
                    .iter()
                    .any(|m| matches!(m, ResolvedTypeFunction::NoneType))
                {
                    Ok(RefinementStatus::Refined)
                } else {
                    Ok(RefinementStatus::NotRefined)
                }
            }
            ResolvedTypeFunction::Entity { base, .. } if base.name() == "Optional" => {
                Ok(RefinementStatus::Refined)
            }
            ResolvedTypeFunction::Entity { .. } => Ok(RefinementStatus::NotRefined),
            _ => Ok(RefinementStatus::Unknown),
        }
    }
}

/// `IsExactly[T]`: structural equality with `T`
struct IsExactly;

impl PredicateFn for IsExactly {
    fn evaluate(
        &self,
        args: &[ResolvedTypeFunction],
        target: &ResolvedTypeFunction,
        ctx: &mut EvalContext<'_, '_>,
    ) -> Result<RefinementStatus, EngineError> {
        expect_arity("IsExactly", 1, args)?;
        ctx.satisfies(&args[0], target)
    }

    fn binds_to(&self, args: &[ResolvedTypeFunction]) -> Option<ResolvedTypeFunction> {
        args.first().cloned()
    }
}

/// `IsConstructedFrom[C]`: the target's outermost constructor is `C`
struct IsConstructedFrom;

impl PredicateFn for IsConstructedFrom {
    fn evaluate(
        &self,
        args: &[ResolvedTypeFunction],
        target: &ResolvedTypeFunction,
        ctx: &mut EvalContext<'_, '_>,
    ) -> Result<RefinementStatus, EngineError> {
        expect_arity("IsConstructedFrom", 1, args)?;
        let ResolvedTypeFunction::Entity {
            base: constructor, ..
        } = &args[0]
        else {
            return Err(EngineError::InvalidDefinition {
                name: "IsConstructedFrom".to_string(),
                reason: format!("`{}` does not name a type constructor", args[0]),
            });
        };
        match target {
            ResolvedTypeFunction::Entity { base, .. } => {
                if base.name() == constructor.name() {
                    Ok(RefinementStatus::Refined)
                } else {
                    Ok(RefinementStatus::NotRefined)
                }
            }
            ResolvedTypeFunction::Union { members } => {
                let mut status = RefinementStatus::Refined;
                for member in members {
                    status = status.and(ctx.evaluate_self(member)?);
                    if status == RefinementStatus::NotRefined {
                        break;
                    }
                }
                Ok(status)
            }
            ResolvedTypeFunction::NoneType => Ok(RefinementStatus::NotRefined),
            _ => Ok(RefinementStatus::Unknown),
        }
    }
}
