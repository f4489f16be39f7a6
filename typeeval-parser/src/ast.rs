// Type expression AST definitions
// Immutable trees with source spans; produced once per input string.

use std::fmt;

/// Source position information for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A parsed type expression
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeExprKind,
    pub span: Span,
}

/// Node kinds of the type expression tree
///
/// The reserved identifier `This` parses as a plain `Name` node; it is
/// disambiguated into the self-reference marker during resolution, because
/// parsing has no access to the active symbol table.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExprKind {
    /// Bare name: `Foo`, `collections.abc.Sequence`
    Name(Name),
    /// Generic application: `Foo[Bar, None]`
    Application {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    /// Union: `A | B | None`
    Union { members: Vec<TypeExpr> },
    /// The literal token `None`
    NoneLiteral,
}

/// A (possibly dotted) identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub name: String,
    pub span: Span,
}

impl TypeExpr {
    /// Structural equality ignoring spans
    pub fn structurally_equal(&self, other: &TypeExpr) -> bool {
        match (&self.kind, &other.kind) {
            (TypeExprKind::Name(a), TypeExprKind::Name(b)) => a.name == b.name,
            (TypeExprKind::NoneLiteral, TypeExprKind::NoneLiteral) => true,
            (
                TypeExprKind::Application { base: b1, args: a1 },
                TypeExprKind::Application { base: b2, args: a2 },
            ) => {
                b1.structurally_equal(b2)
                    && a1.len() == a2.len()
                    && a1.iter().zip(a2).all(|(x, y)| x.structurally_equal(y))
            }
            (TypeExprKind::Union { members: m1 }, TypeExprKind::Union { members: m2 }) => {
                m1.len() == m2.len()
                    && m1.iter().zip(m2).all(|(x, y)| x.structurally_equal(y))
            }
            _ => false,
        }
    }
}

/// Canonical textual form; re-parsing this yields a structurally equal tree
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeExprKind::Name(name) => write!(f, "{}", name.name),
            TypeExprKind::NoneLiteral => write!(f, "None"),
            TypeExprKind::Application { base, args } => {
                // A union base re-parses as a union of an application without
                // parentheses, so it must be wrapped.
                if matches!(base.kind, TypeExprKind::Union { .. }) {
                    write!(f, "({base})[")?;
                } else {
                    write!(f, "{base}[")?;
                }
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
            TypeExprKind::Union { members } => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    if matches!(member.kind, TypeExprKind::Union { .. }) {
                        write!(f, "({member})")?;
                    } else {
                        write!(f, "{member}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// A serialized mapping literal: `{"Foo": "Bar[int]", "T": None}`
#[derive(Debug, Clone, PartialEq)]
pub struct MappingLiteral {
    pub entries: Vec<MappingEntry>,
    pub span: Span,
}

/// One `"name": value` pair of a mapping literal
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    pub key: String,
    pub key_span: Span,
    pub value: MappingValue,
    pub span: Span,
}

/// The value side of a mapping entry
#[derive(Debug, Clone, PartialEq)]
pub enum MappingValue {
    /// The bare token `None` (an unconstrained typevar entry)
    None { span: Span },
    /// A quoted type-expression string, stored unparsed
    Expr { text: String, span: Span },
}
