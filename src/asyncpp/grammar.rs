//! Grammars for the two rewrite phases
//!
//! Both grammars have the same outer shape: alternate runs of literal text
//! with constructs that start at a keyword, until the end of input.
//!
//!     phase one:  literal* (async-function literal*)*    keyword `async`
//!     phase two:  literal* (await-call literal*)*        keyword `await`
//!
//! Once a keyword is seen at a word boundary the construct is committed. If it
//! does not match, the whole parse fails: there is no skip-and-continue.
//!
//! The grammars are built once by [`Grammar::async_functions`] and
//! [`Grammar::await_calls`] and can be reused for any number of parses.

pub mod async_fn;
pub mod await_call;
pub mod common;
mod error;

pub use error::GrammarError;

use chumsky::prelude::*;
use std::fmt;

use self::common::ParserError;
use self::error::CharOffsets;
use crate::asyncpp::ast::{AsyncFunction, Await, ParseTree, Segment};

/// Which of the two rewrite phases a grammar belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    AsyncFunctions,
    AwaitCalls,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AsyncFunctions => write!(f, "async-function"),
            Phase::AwaitCalls => write!(f, "await-call"),
        }
    }
}

/// A built grammar producing a [`ParseTree`] of `T` records.
pub struct Grammar<T> {
    phase: Phase,
    parser: BoxedParser<'static, char, ParseTree<T>, ParserError>,
}

impl Grammar<AsyncFunction> {
    /// Phase one. `future_type` is the template spelling accepted as a
    /// return type, e.g. `std::future`.
    pub fn async_functions(future_type: &str) -> Self {
        Self {
            phase: Phase::AsyncFunctions,
            parser: async_fn::grammar(future_type).boxed(),
        }
    }
}

impl Grammar<Await> {
    /// Phase two, run over the output of phase one.
    pub fn await_calls(future_type: &str) -> Self {
        Self {
            phase: Phase::AwaitCalls,
            parser: await_call::grammar(future_type).boxed(),
        }
    }
}

impl<T> Grammar<T> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Parse `source` into segments. Construct spans are byte ranges into
    /// `source`.
    pub fn parse(&self, source: &str) -> Result<ParseTree<T>, GrammarError> {
        let offsets = CharOffsets::new(source);
        let tree = self
            .parser
            .parse(source)
            .map_err(|errors| GrammarError::from_parser_errors(self.phase, source, &offsets, errors))?;

        Ok(tree
            .into_iter()
            .map(|segment| match segment {
                Segment::Construct(mut construct) => {
                    construct.span = offsets.byte(construct.span.start)..offsets.byte(construct.span.end);
                    Segment::Construct(construct)
                }
                literal => literal,
            })
            .collect())
    }
}

/// Wrap a construct parser into a whole-input grammar:
/// `(literal | construct)* end`.
pub(crate) fn segments<T, L, C>(
    literal: L,
    construct: C,
) -> impl Parser<char, ParseTree<T>, Error = ParserError> + Clone
where
    T: Clone,
    L: Parser<char, Segment<T>, Error = ParserError> + Clone,
    C: Parser<char, T, Error = ParserError> + Clone,
{
    literal
        .or(construct.map_with_span(Segment::construct))
        .repeated()
        .then_ignore(end())
}
