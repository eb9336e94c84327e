//! Phase one: `async <return_type> <name>(<params>) { <body> }`

use chumsky::prelude::*;

use super::common::{
    body, ident, keyword, literal_until_or, param_list, return_type, token, ParserError,
};
use super::segments;
use crate::asyncpp::ast::{AsyncFunction, ParseTree};

/// A single async function declaration, starting at the `async` keyword.
pub fn async_function(
    future_type: &str,
) -> impl Parser<char, AsyncFunction, Error = ParserError> + Clone {
    keyword("async")
        .ignore_then(token(return_type(future_type)))
        .then(token(ident()).labelled("function name"))
        .then(param_list())
        .then(body())
        .map(|(((return_type, name), params), body)| AsyncFunction {
            return_type,
            name,
            params,
            body,
        })
}

/// `await <ws> async`, left for phase two to rewrite as an inline lambda.
fn await_async() -> impl Parser<char, String, Error = ParserError> + Clone {
    keyword("await")
        .ignore_then(
            filter(|c: &char| c.is_whitespace())
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(keyword("async"))
        .map(|gap| format!("await{gap}async"))
}

pub fn grammar(future_type: &str) -> impl Parser<char, ParseTree<AsyncFunction>, Error = ParserError> + Clone {
    segments(literal_until_or("async", await_async()), async_function(future_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asyncpp::ast::{Param, Segment};
    use crate::asyncpp::grammar::Grammar;

    fn parse(source: &str) -> ParseTree<AsyncFunction> {
        Grammar::async_functions("std::future").parse(source).unwrap()
    }

    #[test]
    fn test_single_declaration() {
        let tree = parse("async int foo(int num) { return 1; }");
        assert_eq!(
            tree,
            vec![Segment::construct(
                AsyncFunction {
                    return_type: "int".to_string(),
                    name: "foo".to_string(),
                    params: vec![Param::new("int", "num")],
                    body: "return 1; ".to_string(),
                },
                0..36,
            )]
        );
    }

    #[test]
    fn test_literals_around_declaration() {
        let tree = parse("#include <x>\nasync Data f(string u)\n{\n  go(u);\n}\nint main() {}\n");
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[0].as_literal(), Some("#include <x>\n"));
        assert_eq!(tree[1].as_construct().unwrap().body, "go(u);\n");
        assert_eq!(tree[2].as_literal(), Some("\nint main() {}\n"));
    }

    #[test]
    fn test_template_return_type() {
        let tree = parse("async std::future<int> f() { return g(); }");
        assert_eq!(tree[0].as_construct().unwrap().return_type, "std::future<int>");
    }

    #[test]
    fn test_await_async_pair_is_literal() {
        let source = "int v = await async int(int n) { return n; } (2);";
        let tree = parse(source);
        assert_eq!(tree, vec![Segment::literal(source)]);
    }

    #[test]
    fn test_qualified_and_embedded_words_are_literal() {
        let source = "auto f = std::async(g); int asynchronous = my_async;";
        assert_eq!(parse(source), vec![Segment::literal(source)]);
    }

    #[test]
    fn test_malformed_declaration_fails() {
        let err = Grammar::async_functions("std::future")
            .parse("int a;\nasync int (int x) { }")
            .unwrap_err();
        assert_eq!(err.phase, super::super::Phase::AsyncFunctions);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }
}
