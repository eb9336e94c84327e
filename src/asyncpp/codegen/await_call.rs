//! Phase two generator: awaits become blocking `.get()` calls.

use super::{capture_closure, Emit};
use crate::asyncpp::ast::{param_list, Await};
use crate::asyncpp::config::CodegenConfig;

impl Emit for Await {
    fn emit(&self, idiom: &CodegenConfig, out: &mut String) {
        match self {
            // The grammar consumed the closing paren, put it back.
            Await::Plain { expression } => {
                out.push_str(&format!("{expression}).{}()", idiom.retrieve));
            }
            Await::AsyncLambda {
                params, body, args, ..
            } => {
                out.push_str(&format!(
                    "({launch}[]({params}){closure}({args})).{retrieve}()",
                    launch = idiom.launch_open(),
                    params = param_list(params),
                    closure = capture_closure(body),
                    args = args.join(", "),
                    retrieve = idiom.retrieve,
                ));
            }
        }
    }
}
