//! Parse tree types shared by both rewrite phases
//!
//! A phase parses its input into an ordered list of [`Segment`]s: verbatim
//! [`Segment::Literal`] text interleaved with [`Segment::Construct`] records.
//! Order is significant, regenerating the segments in order reproduces every
//! byte of the input that was not part of a construct.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Output of one grammar run.
pub type ParseTree<T> = Vec<Segment<T>>;

/// One unit of phase output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment<T> {
    Literal { text: String },
    Construct(Construct<T>),
}

impl<T> Segment<T> {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal { text: text.into() }
    }

    pub fn construct(record: T, span: Range<usize>) -> Self {
        Segment::Construct(Construct { record, span })
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal { text } => Some(text),
            Segment::Construct(_) => None,
        }
    }

    pub fn as_construct(&self) -> Option<&T> {
        match self {
            Segment::Literal { .. } => None,
            Segment::Construct(construct) => Some(&construct.record),
        }
    }
}

/// A recognized record together with the byte span it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Construct<T> {
    pub record: T,
    pub span: Range<usize>,
}

/// Rebuild the source a parse tree came from.
///
/// Literals are copied and constructs are replaced by the source text under
/// their span, so `reconstruct(source, &parse(source)?) == source`.
pub fn reconstruct<T>(source: &str, tree: &[Segment<T>]) -> String {
    let mut out = String::with_capacity(source.len());
    for segment in tree {
        match segment {
            Segment::Literal { text } => out.push_str(text),
            Segment::Construct(construct) => {
                out.push_str(source.get(construct.span.clone()).unwrap_or_default())
            }
        }
    }
    out
}

/// Iterate the records of a parse tree, skipping literals.
pub fn constructs<T>(tree: &[Segment<T>]) -> impl Iterator<Item = &T> {
    tree.iter().filter_map(Segment::as_construct)
}

/// A `type name` pair from a parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// Join a parameter list the way it is re-emitted: `int a, char* b`.
pub fn param_list(params: &[Param]) -> String {
    params
        .iter()
        .map(Param::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `async <return_type> <name>(<params>) { <body> }`
///
/// `body` is everything after the opening brace (leading whitespace skipped)
/// up to the first `}`. Braces are not balanced, so a nested block cuts the
/// body short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsyncFunction {
    pub return_type: String,
    pub name: String,
    pub params: Vec<Param>,
    pub body: String,
}

/// A record recognized by the await-call grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Await {
    /// `await <expression>)`, the expression runs up to the next `)`.
    Plain { expression: String },
    /// `await async <return_type>(<params>) { <body> } (<args>)`
    AsyncLambda {
        return_type: String,
        params: Vec<Param>,
        body: String,
        args: Vec<String>,
    },
}
