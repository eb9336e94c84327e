//! Phase one generator: async declarations become future-returning functions.

use super::{capture_closure, Emit};
use crate::asyncpp::ast::{param_list, AsyncFunction};
use crate::asyncpp::config::CodegenConfig;

impl Emit for AsyncFunction {
    /// `async T f(p) { b }` becomes
    /// `std::future<T> f(p) { return std::async([=](){\nb\n}); }\n`.
    fn emit(&self, idiom: &CodegenConfig, out: &mut String) {
        out.push_str(&format!(
            "{future}<{ret}> {name}({params}) {{ return {launch}{closure}); }}\n",
            future = idiom.future_type,
            ret = self.return_type,
            name = self.name,
            params = param_list(&self.params),
            launch = idiom.launch_open(),
            closure = capture_closure(&self.body),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asyncpp::ast::{Param, Segment};
    use crate::asyncpp::codegen::regenerate;

    fn foo() -> AsyncFunction {
        AsyncFunction {
            return_type: "int".to_string(),
            name: "foo".to_string(),
            params: vec![Param::new("int", "num")],
            body: "return 1; ".to_string(),
        }
    }

    #[test]
    fn test_emit_declaration() {
        let mut out = String::new();
        foo().emit(&CodegenConfig::default(), &mut out);
        assert_eq!(
            out,
            "std::future<int> foo(int num) { return std::async([=](){\nreturn 1; \n}); }\n"
        );
    }

    #[test]
    fn test_emit_with_launch_policy() {
        let idiom = CodegenConfig {
            launch_policy: Some("std::launch::async".to_string()),
            ..CodegenConfig::default()
        };
        let mut out = String::new();
        foo().emit(&idiom, &mut out);
        assert!(out.contains("return std::async(std::launch::async, [=](){"));
    }

    #[test]
    fn test_regenerate_keeps_literals_in_order() {
        let tree = vec![
            Segment::literal("// head\n"),
            Segment::construct(foo(), 0..0),
            Segment::literal("// tail\n"),
        ];
        let out = regenerate(&tree, &CodegenConfig::default());
        assert!(out.starts_with("// head\nstd::future<int> foo("));
        assert!(out.ends_with("}); }\n// tail\n"));
    }
}
