//! Combinator fragments shared by the async-function and await-call grammars.
//!
//! Every capturing fragment skips leading whitespace first (see [`token`]) and
//! keeps trailing whitespace, so `{ return 1; }` captures the body
//! `"return 1; "`.

use chumsky::prelude::*;

use crate::asyncpp::ast::{Param, Segment};

/// Error type produced by every fragment.
pub type ParserError = Simple<char>;

/// Characters that form words for keyword scanning.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Zero or more whitespace characters, discarded.
pub fn ws() -> impl Parser<char, (), Error = ParserError> + Clone {
    filter(|c: &char| c.is_whitespace()).repeated().ignored()
}

/// Skip leading whitespace, then run `parser`.
pub fn token<O, P>(parser: P) -> impl Parser<char, O, Error = ParserError> + Clone
where
    P: Parser<char, O, Error = ParserError> + Clone,
{
    ws().ignore_then(parser)
}

/// A maximal run of word characters.
pub fn word() -> impl Parser<char, String, Error = ParserError> + Clone {
    filter(|c: &char| is_word_char(*c))
        .repeated()
        .at_least(1)
        .collect::<String>()
}

/// A word with optional `::` qualification: `async`, `std::async`, `::async`.
pub fn path() -> impl Parser<char, String, Error = ParserError> + Clone {
    let segment = just("::").ignore_then(word()).map(|w| format!("::{w}"));

    just("::")
        .or_not()
        .then(word())
        .then(segment.repeated())
        .map(|((root, head), tail)| {
            let mut path = root.unwrap_or_default().to_string();
            path.push_str(&head);
            tail.iter().for_each(|s| path.push_str(s));
            path
        })
}

/// The unqualified word `keyword`, matched at word boundaries only.
///
/// A qualified path such as `std::async` never matches, which is what keeps
/// generated code from being picked up again.
pub fn keyword(keyword: &'static str) -> impl Parser<char, (), Error = ParserError> + Clone {
    path().try_map(move |p, span| {
        if p == keyword {
            Ok(())
        } else {
            Err(Simple::custom(
                span,
                format!("expected `{keyword}`, found `{p}`"),
            ))
        }
    })
}

/// Any word or path except the unqualified `keyword`.
fn word_except(keyword: &'static str) -> impl Parser<char, String, Error = ParserError> + Clone {
    path().try_map(move |p, span| {
        if p == keyword {
            Err(Simple::custom(span, format!("`{keyword}` starts a construct")))
        } else {
            Ok(p)
        }
    })
}

/// A single character that is not part of a word.
fn non_word_char() -> impl Parser<char, String, Error = ParserError> + Clone {
    filter(|c: &char| !is_word_char(*c)).map(String::from)
}

/// Verbatim text up to the next occurrence of the unqualified `keyword`.
pub fn literal_until<T>(
    keyword: &'static str,
) -> impl Parser<char, Segment<T>, Error = ParserError> + Clone {
    word_except(keyword)
        .or(non_word_char())
        .repeated()
        .at_least(1)
        .map(|parts| Segment::literal(parts.concat()))
}

/// Like [`literal_until`], but `passthrough` is tried first at every
/// position, letting a grammar claim keyword-bearing text as literal.
pub fn literal_until_or<T, P>(
    keyword: &'static str,
    passthrough: P,
) -> impl Parser<char, Segment<T>, Error = ParserError> + Clone
where
    P: Parser<char, String, Error = ParserError> + Clone,
{
    choice((passthrough, word_except(keyword), non_word_char()))
        .repeated()
        .at_least(1)
        .map(|parts| Segment::literal(parts.concat()))
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn ident() -> impl Parser<char, String, Error = ParserError> + Clone {
    text::ident::<char, ParserError>()
}

/// A bare identifier or the template spelling `<future_type><...>`.
///
/// The template form ends at the first `>` on the same line, so nested
/// templates are cut at their inner `>`.
pub fn return_type(future_type: &str) -> impl Parser<char, String, Error = ParserError> + Clone {
    let template = just(format!("{future_type}<"))
        .then(none_of(">\n").repeated().collect::<String>())
        .then_ignore(just('>'))
        .map(|(open, inner)| format!("{open}{inner}>"));

    template.or(ident()).labelled("return type")
}

/// `[A-Za-z_][A-Za-z0-9_:*]*`
fn param_type() -> impl Parser<char, String, Error = ParserError> + Clone {
    filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .chain::<char, Vec<char>, _>(
            filter(|c: &char| c.is_ascii_alphanumeric() || matches!(*c, '_' | ':' | '*'))
                .repeated(),
        )
        .collect::<String>()
}

/// `type name`
pub fn param() -> impl Parser<char, Param, Error = ParserError> + Clone {
    token(param_type())
        .then(token(ident()))
        .map(|(ty, name)| Param::new(ty, name))
        .labelled("parameter")
}

/// `( type name, ... )`, commas are not nesting-aware.
pub fn param_list() -> impl Parser<char, Vec<Param>, Error = ParserError> + Clone {
    token(just('('))
        .ignore_then(param().separated_by(token(just(','))))
        .then_ignore(token(just(')')))
}

/// `{ ... }` up to the first closing brace, without depth tracking.
pub fn body() -> impl Parser<char, String, Error = ParserError> + Clone {
    token(just('{'))
        .ignore_then(token(none_of("}").repeated().collect::<String>()))
        .then_ignore(just('}'))
        .labelled("body")
}

/// `( arg, ... )` where each argument is raw text without `,`, `(` or `)`.
pub fn arg_list() -> impl Parser<char, Vec<String>, Error = ParserError> + Clone {
    let arg = token(none_of(",()").repeated().at_least(1).collect::<String>());

    token(just('('))
        .ignore_then(arg.separated_by(token(just(','))))
        .then_ignore(token(just(')')))
        .labelled("arguments")
}
