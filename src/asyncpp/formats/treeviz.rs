//! Treeviz formatter for parse trees
//!
//! One line per node, nesting shown with box-drawing connectors, labels
//! truncated to 30 characters:
//!
//!     ⧉ 3 segments
//!     ├─ ¶ "int var = "
//!     ├─ λ await async int
//!     │ ├─ ◦ int num
//!     │ ├─ { "return 1; "
//!     │ └─ ⋯ 2
//!     └─ ¶ ";"
//!
//! Icons
//!     Tree: ⧉
//!     Literal: ¶
//!     AsyncFunction: ƒ
//!     PlainAwait: ⇥
//!     AsyncLambda: λ
//!     Param: ◦
//!     Body: {
//!     Argument: ⋯

use crate::asyncpp::ast::{AsyncFunction, Await, Param, Segment};

/// A display-only view of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstSnapshot {
    pub node_type: &'static str,
    pub label: String,
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn leaf(node_type: &'static str, label: impl Into<String>) -> Self {
        Self {
            node_type,
            label: label.into(),
            children: Vec::new(),
        }
    }
}

/// Records that can be shown in a treeviz dump.
pub trait ToSnapshot {
    fn to_snapshot(&self) -> AstSnapshot;
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Tree" => "⧉",
        "Literal" => "¶",
        "AsyncFunction" => "ƒ",
        "PlainAwait" => "⇥",
        "AsyncLambda" => "λ",
        "Param" => "◦",
        "Body" => "{",
        "Argument" => "⋯",
        _ => "○",
    }
}

fn param_snapshots(params: &[Param]) -> impl Iterator<Item = AstSnapshot> + '_ {
    params
        .iter()
        .map(|p| AstSnapshot::leaf("Param", p.to_string()))
}

impl ToSnapshot for AsyncFunction {
    fn to_snapshot(&self) -> AstSnapshot {
        let mut children: Vec<AstSnapshot> = param_snapshots(&self.params).collect();
        children.push(AstSnapshot::leaf("Body", format!("{:?}", self.body)));
        AstSnapshot {
            node_type: "AsyncFunction",
            label: format!("async {} {}", self.return_type, self.name),
            children,
        }
    }
}

impl ToSnapshot for Await {
    fn to_snapshot(&self) -> AstSnapshot {
        match self {
            Await::Plain { expression } => {
                AstSnapshot::leaf("PlainAwait", format!("await {expression})"))
            }
            Await::AsyncLambda {
                return_type,
                params,
                body,
                args,
            } => {
                let mut children: Vec<AstSnapshot> = param_snapshots(params).collect();
                children.push(AstSnapshot::leaf("Body", format!("{body:?}")));
                children.extend(args.iter().map(|a| AstSnapshot::leaf("Argument", a.clone())));
                AstSnapshot {
                    node_type: "AsyncLambda",
                    label: format!("await async {return_type}"),
                    children,
                }
            }
        }
    }
}

impl<T: ToSnapshot> ToSnapshot for Segment<T> {
    fn to_snapshot(&self) -> AstSnapshot {
        match self {
            Segment::Literal { text } => AstSnapshot::leaf("Literal", format!("{text:?}")),
            Segment::Construct(construct) => construct.record.to_snapshot(),
        }
    }
}

fn format_snapshot(snapshot: &AstSnapshot, prefix: &str, is_last: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(snapshot.node_type),
        truncate(&snapshot.label, 30)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, &child_prefix, i + 1 == count, output);
    }
}

/// Render a whole parse tree.
pub fn to_treeviz_str<T: ToSnapshot>(tree: &[Segment<T>]) -> String {
    let mut output = format!("{} {} segments\n", get_icon("Tree"), tree.len());
    let count = tree.len();
    for (i, segment) in tree.iter().enumerate() {
        format_snapshot(&segment.to_snapshot(), "", i + 1 == count, &mut output);
    }
    output
}
