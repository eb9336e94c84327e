//! Configuration loading
//!
//! `defaults/asyncpp.default.toml` is embedded into the crate so that docs and
//! runtime behavior stay in sync. Callers layer user files and single-key
//! overrides on top of it via [`Loader`] before deserializing into
//! [`AsyncppConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::asyncpp::formats::AstFormat;

const DEFAULT_TOML: &str = include_str!("../../defaults/asyncpp.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AsyncppConfig {
    pub codegen: CodegenConfig,
    pub diagnostics: DiagnosticsConfig,
}

/// Spelling of the future/thread idiom the generators emit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodegenConfig {
    pub future_type: String,
    pub launch: String,
    pub retrieve: String,
    #[serde(default)]
    pub launch_policy: Option<String>,
}

impl CodegenConfig {
    /// `launch(` plus the policy argument, if any.
    pub(crate) fn launch_open(&self) -> String {
        match &self.launch_policy {
            Some(policy) => format!("{}({}, ", self.launch, policy),
            None => format!("{}(", self.launch),
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            future_type: "std::future".to_string(),
            launch: "std::async".to_string(),
            retrieve: "get".to_string(),
            launch_policy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DiagnosticsConfig {
    pub ast_format: AstFormat,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AsyncppConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = Loader::new().build().expect("defaults to deserialize");
        assert_eq!(config, AsyncppConfig::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("codegen.launch_policy", "std::launch::async")
            .expect("override to apply")
            .set_override("diagnostics.ast_format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(
            config.codegen.launch_policy.as_deref(),
            Some("std::launch::async")
        );
        assert_eq!(config.diagnostics.ast_format, AstFormat::Json);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[codegen]\nfuture_type = \"boost::future\"").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.codegen.future_type, "boost::future");
        assert_eq!(config.codegen.launch, "std::async");
    }

    #[test]
    fn launch_open_includes_policy() {
        let mut codegen = CodegenConfig::default();
        assert_eq!(codegen.launch_open(), "std::async(");
        codegen.launch_policy = Some("std::launch::async".to_string());
        assert_eq!(codegen.launch_open(), "std::async(std::launch::async, ");
    }
}
