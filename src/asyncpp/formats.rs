//! Parse tree output formats
//!
//! Used for the diagnostic dump of a phase's parse tree:
//! - `treeviz`: one line per node, indented with box-drawing connectors
//! - `json` / `yaml`: the serde representation of the segments

pub mod treeviz;

pub use treeviz::{to_treeviz_str, AstSnapshot, ToSnapshot};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::asyncpp::ast::Segment;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Format name not recognized
    UnknownFormat(String),
    /// Error during serialization
    Serialization(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => write!(
                f,
                "Format '{name}' not found (available: {})",
                AstFormat::NAMES.join(", ")
            ),
            FormatError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Available parse tree renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AstFormat {
    #[default]
    Treeviz,
    Json,
    Yaml,
}

impl AstFormat {
    pub const NAMES: [&'static str; 3] = ["treeviz", "json", "yaml"];

    pub fn name(&self) -> &'static str {
        match self {
            AstFormat::Treeviz => "treeviz",
            AstFormat::Json => "json",
            AstFormat::Yaml => "yaml",
        }
    }

    /// Render `tree` in this format.
    pub fn render<T>(&self, tree: &[Segment<T>]) -> Result<String, FormatError>
    where
        T: Serialize + ToSnapshot,
    {
        match self {
            AstFormat::Treeviz => Ok(to_treeviz_str(tree)),
            AstFormat::Json => serde_json::to_string_pretty(tree)
                .map_err(|e| FormatError::Serialization(e.to_string())),
            AstFormat::Yaml => {
                serde_yaml::to_string(tree).map_err(|e| FormatError::Serialization(e.to_string()))
            }
        }
    }
}

impl fmt::Display for AstFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AstFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "treeviz" => Ok(AstFormat::Treeviz),
            "json" => Ok(AstFormat::Json),
            "yaml" => Ok(AstFormat::Yaml),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asyncpp::ast::Await;

    fn tree() -> Vec<Segment<Await>> {
        vec![
            Segment::construct(
                Await::Plain {
                    expression: "dl(u".to_string(),
                },
                0..11,
            ),
            Segment::literal(";"),
        ]
    }

    #[test]
    fn test_format_names_round_trip() {
        for name in AstFormat::NAMES {
            assert_eq!(name.parse::<AstFormat>().unwrap().name(), name);
        }
        assert_eq!(
            "xml".parse::<AstFormat>(),
            Err(FormatError::UnknownFormat("xml".to_string()))
        );
    }

    #[test]
    fn test_json_rendering() {
        let json = AstFormat::Json.render(&tree()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "construct");
        assert_eq!(value[0]["record"]["kind"], "plain");
        assert_eq!(value[0]["record"]["expression"], "dl(u");
        assert_eq!(value[0]["span"]["end"], 11);
        assert_eq!(value[1]["text"], ";");
    }

    #[test]
    fn test_yaml_rendering() {
        let yaml = AstFormat::Yaml.render(&tree()).unwrap();
        assert!(yaml.contains("kind: plain"));
        assert!(yaml.contains("dl(u"));
    }
}
