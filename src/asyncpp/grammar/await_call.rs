//! Phase two: `await` expressions
//!
//! Two productions, tried in order:
//!
//! 1. `await async <return_type>(<params>) { <body> } (<args>)`
//! 2. `await <expression>)` where the expression is everything up to the
//!    next `)`, which is consumed with it.
//!
//! The first is committed as soon as `async` follows `await`, the second is
//! only tried otherwise.

use chumsky::prelude::*;

use super::common::{
    arg_list, body, is_word_char, keyword, literal_until, param_list, return_type, token,
    ParserError,
};
use super::segments;
use crate::asyncpp::ast::{Await, ParseTree};

/// `await async T(params) { body } (args)`
pub fn await_async_lambda(
    future_type: &str,
) -> impl Parser<char, Await, Error = ParserError> + Clone {
    keyword("await")
        .ignore_then(token(keyword("async")))
        .ignore_then(token(return_type(future_type)))
        .then(param_list())
        .then(body())
        .then(arg_list())
        .map(|(((return_type, params), body), args)| Await::AsyncLambda {
            return_type,
            params,
            body,
            args,
        })
}

/// `await expr)`
pub fn plain_await() -> impl Parser<char, Await, Error = ParserError> + Clone {
    let expression = none_of(")")
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|expression, span| {
            if starts_with_async(&expression) {
                Err(Simple::custom(span, "malformed inline async lambda"))
            } else {
                Ok(expression)
            }
        });

    keyword("await")
        .ignore_then(token(expression))
        .then_ignore(just(')'))
        .map(|expression| Await::Plain { expression })
}

/// True when `text` begins with the unqualified word `async`.
fn starts_with_async(text: &str) -> bool {
    text.strip_prefix("async").is_some_and(|rest| {
        !rest.starts_with(is_word_char) && !rest.starts_with("::")
    })
}

pub fn grammar(future_type: &str) -> impl Parser<char, ParseTree<Await>, Error = ParserError> + Clone {
    segments(
        literal_until("await"),
        await_async_lambda(future_type).or(plain_await()),
    )
}
