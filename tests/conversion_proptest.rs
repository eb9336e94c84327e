//! Property-based tests for the conversion pipeline
//!
//! - text without `async`/`await` words passes through unchanged
//! - a phase-one parse tree reproduces its source exactly
//! - every generated declaration keeps its name, type and parameters

use asyncpp::asyncpp::ast::{constructs, reconstruct};
use asyncpp::Converter;
use proptest::prelude::*;

const KEYWORDS: [&str; 2] = ["async", "await"];

/// Arbitrary C-like text that never contains a keyword.
fn plain_text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ ;:(){}<>=+*&,.\"\n\t-]{0,80}"
        .prop_filter("no keywords", |s| !KEYWORDS.iter().any(|k| s.contains(k)))
}

fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-zA-Z0-9_]{0,8}".prop_filter("not a keyword", |s| !KEYWORDS.contains(&s.as_str()))
}

fn param_strategy() -> impl Strategy<Value = String> {
    (ident_strategy(), ident_strategy()).prop_map(|(ty, name)| format!("{} {}", ty, name))
}

/// `(return type, name, params, source text)`
fn async_function_strategy() -> impl Strategy<Value = (String, String, String, String)> {
    (
        ident_strategy(),
        ident_strategy(),
        prop::collection::vec(param_strategy(), 0..4),
        "[a-z0-9 =;+]{0,20}".prop_filter("no keywords", |s| !KEYWORDS.iter().any(|k| s.contains(k))),
    )
        .prop_map(|(ty, name, params, body)| {
            let params = params.join(", ");
            let source = format!("async {} {}({}) {{ {} }}", ty, name, params, body);
            (ty, name, params, source)
        })
}

proptest! {
    #[test]
    fn test_text_without_keywords_is_identity(text in plain_text_strategy()) {
        let converter = Converter::new();
        prop_assert_eq!(converter.convert(&text, false).unwrap(), text);
    }

    #[test]
    fn test_segments_preserve_order(
        literals in prop::collection::vec(plain_text_strategy(), 1..5),
        functions in prop::collection::vec(async_function_strategy(), 0..4),
    ) {
        let mut source = String::new();
        for (i, literal) in literals.iter().enumerate() {
            source.push_str(literal);
            source.push('\n');
            if let Some((_, _, _, function)) = functions.get(i) {
                source.push_str(function);
                source.push('\n');
            }
        }
        let expected_count = functions.len().min(literals.len());

        let tree = Converter::new().parse_async_functions(&source).unwrap();
        prop_assert_eq!(reconstruct(&source, &tree), source);
        prop_assert_eq!(constructs(&tree).count(), expected_count);
    }

    #[test]
    fn test_declarations_keep_signature((ty, name, params, source) in async_function_strategy()) {
        let out = Converter::new().convert(&source, false).unwrap();
        let signature = format!("std::future<{}> {}({}) {{ return std::async([=](){{\n", ty, name, params);
        prop_assert!(out.starts_with(&signature), "{:?} does not start with {:?}", out, signature);
    }
}
