//! The two-phase conversion pipeline
//!
//!     source ──async-function grammar──▶ ParseTree<AsyncFunction>
//!            ──generate──▶ text
//!            ──await-call grammar──▶ ParseTree<Await>
//!            ──generate──▶ final code
//!
//! Phase two runs over the text produced by phase one, not over the original
//! source. The only `async` words left by then are the qualified
//! `std::async` calls phase one generated and the `await async` pairs it
//! passed through, so neither grammar can pick up the other's output.
//!
//! A [`Converter`] builds both grammars once and reuses them. `convert` takes
//! `&self` and keeps no state between calls. The grammars hold `Rc`-based
//! parsers, so a converter stays on the thread that built it; run parallel
//! conversions with one converter per thread.

use std::fmt;
use tracing::{debug, info};

use crate::asyncpp::ast::{AsyncFunction, Await, ParseTree};
use crate::asyncpp::codegen::regenerate;
use crate::asyncpp::config::AsyncppConfig;
use crate::asyncpp::formats::FormatError;
use crate::asyncpp::grammar::{Grammar, GrammarError};

/// Errors during conversion. No partial output is ever produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    Grammar(GrammarError),
    Format(FormatError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Grammar(err) => write!(f, "Parsing failed: {err}"),
            ConvertError::Format(err) => write!(f, "Parse tree dump failed: {err}"),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Grammar(err) => Some(err),
            ConvertError::Format(err) => Some(err),
        }
    }
}

impl From<GrammarError> for ConvertError {
    fn from(err: GrammarError) -> Self {
        ConvertError::Grammar(err)
    }
}

impl From<FormatError> for ConvertError {
    fn from(err: FormatError) -> Self {
        ConvertError::Format(err)
    }
}

/// Rewrites async/await source into future/thread code.
pub struct Converter {
    config: AsyncppConfig,
    async_functions: Grammar<AsyncFunction>,
    await_calls: Grammar<Await>,
}

impl Converter {
    /// Converter with the default idiom (`std::future`, `std::async`, `get`).
    pub fn new() -> Self {
        Self::with_config(AsyncppConfig::default())
    }

    pub fn with_config(config: AsyncppConfig) -> Self {
        let future_type = &config.codegen.future_type;
        Self {
            async_functions: Grammar::async_functions(future_type),
            await_calls: Grammar::await_calls(future_type),
            config,
        }
    }

    pub fn config(&self) -> &AsyncppConfig {
        &self.config
    }

    /// Run both phases over `source`.
    ///
    /// With `verbose`, the phase-two parse tree is logged at `INFO` in the
    /// configured diagnostics format before it is generated. Logging has no
    /// effect on the result.
    pub fn convert(&self, source: &str, verbose: bool) -> Result<String, ConvertError> {
        let code = self.rewrite_async_functions(source)?;

        let tree = self.parse_await_calls(&code)?;
        debug!(segments = tree.len(), "parsed await calls");
        if verbose {
            let format = self.config.diagnostics.ast_format;
            info!("AST:\n{}", format.render(&tree)?);
        }

        Ok(regenerate(&tree, &self.config.codegen))
    }

    /// Phase one alone: rewrite async declarations, leave awaits untouched.
    pub fn rewrite_async_functions(&self, source: &str) -> Result<String, ConvertError> {
        let tree = self.parse_async_functions(source)?;
        debug!(segments = tree.len(), "parsed async functions");
        Ok(regenerate(&tree, &self.config.codegen))
    }

    pub fn parse_async_functions(
        &self,
        source: &str,
    ) -> Result<ParseTree<AsyncFunction>, GrammarError> {
        self.async_functions.parse(source)
    }

    pub fn parse_await_calls(&self, code: &str) -> Result<ParseTree<Await>, GrammarError> {
        self.await_calls.parse(code)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static DEFAULT_CONVERTER: Converter = Converter::new();
}

/// Convert with the default configuration, reusing a per-thread converter.
pub fn convert(source: &str) -> Result<String, ConvertError> {
    DEFAULT_CONVERTER.with(|converter| converter.convert(source, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asyncpp::config::CodegenConfig;
    use crate::asyncpp::grammar::Phase;

    #[test]
    fn test_plain_await() {
        assert!(convert("await dl(u);").unwrap().contains("dl(u).get();"));
    }

    #[test]
    fn test_async_function() {
        let out = convert("async int foo(int num) { return 1; }").unwrap();
        assert!(out.contains(
            "std::future<int> foo(int num) { return std::async([=](){\nreturn 1; \n}); }"
        ));
    }

    #[test]
    fn test_await_inside_async_body_is_rewritten() {
        let out = convert("async Data f(string u) { Data d = await dl(u); return d; }").unwrap();
        assert_eq!(
            out,
            "std::future<Data> f(string u) { return std::async([=](){\nData d = dl(u).get(); return d; \n}); }\n"
        );
    }

    #[test]
    fn test_phase_one_failure_aborts() {
        let err = Converter::new()
            .convert("int x;\nasync int { }", false)
            .unwrap_err();
        match err {
            ConvertError::Grammar(err) => assert_eq!(err.phase, Phase::AsyncFunctions),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_phase_two_failure_aborts() {
        let err = Converter::new().convert("x = await y;", true).unwrap_err();
        match err {
            ConvertError::Grammar(err) => assert_eq!(err.phase, Phase::AwaitCalls),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_verbose_does_not_change_output() {
        let converter = Converter::new();
        let source = "int v = await async int(int n) { return n; } (2);";
        assert_eq!(
            converter.convert(source, true).unwrap(),
            converter.convert(source, false).unwrap()
        );
    }

    #[test]
    fn test_custom_future_type_is_recognized_and_emitted() {
        let config = AsyncppConfig {
            codegen: CodegenConfig {
                future_type: "boost::future".to_string(),
                launch: "boost::async".to_string(),
                ..CodegenConfig::default()
            },
            ..AsyncppConfig::default()
        };
        let out = Converter::with_config(config)
            .convert("async boost::future<int> f() { return g(); }", false)
            .unwrap();
        assert!(out.starts_with(
            "boost::future<boost::future<int>> f() { return boost::async([=](){"
        ));
    }
}
