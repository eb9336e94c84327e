//! Code generators
//!
//! Each phase has a generator that walks its [`ParseTree`] in order, copying
//! literals verbatim and replacing every construct with the future/thread
//! idiom described by [`CodegenConfig`]. Text outside constructs therefore
//! comes out byte-identical.
//!
//! [`ParseTree`]: crate::asyncpp::ast::ParseTree

mod async_fn;
mod await_call;

use crate::asyncpp::ast::Segment;
use crate::asyncpp::config::CodegenConfig;

/// A record that knows how to write its rewritten form.
pub trait Emit {
    fn emit(&self, idiom: &CodegenConfig, out: &mut String);
}

/// Serialize a parse tree back to text.
pub fn regenerate<T: Emit>(tree: &[Segment<T>], idiom: &CodegenConfig) -> String {
    let mut out = String::new();
    for segment in tree {
        match segment {
            Segment::Literal { text } => out.push_str(text),
            Segment::Construct(construct) => construct.record.emit(idiom, &mut out),
        }
    }
    out
}

/// `[=](){\n<body>\n}`, the value-capturing closure wrapped around a body.
fn capture_closure(body: &str) -> String {
    format!("[=](){{\n{body}\n}}")
}
