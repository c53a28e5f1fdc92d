//! Configuration loading for blockconf.
//!
//! `defaults/blockconf.default.toml` is embedded into the crate so that docs
//! and runtime behavior stay in sync. Callers layer user files and overrides
//! on top of those defaults via [`Loader`] before deserializing into
//! [`BlockconfConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::building::BuildOptions;
use crate::formats::{BlockOptions, JsonOptions};

const DEFAULT_TOML: &str = include_str!("../defaults/blockconf.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BlockconfConfig {
    pub parse: ParseConfig,
    pub render: RenderConfig,
}

/// Tree builder settings
#[derive(Debug, Clone, Deserialize)]
pub struct ParseConfig {
    pub reject_unclosed_sections: bool,
}

impl ParseConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            reject_unclosed_sections: self.reject_unclosed_sections,
        }
    }
}

/// Serializer settings shared by all formats, plus per-format groups
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub indent: String,
    pub block: BlockRenderConfig,
    pub json: JsonRenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockRenderConfig {
    pub include_attributes: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRenderConfig {
    pub guard_empty_declarations: bool,
}

impl RenderConfig {
    pub fn block_options(&self) -> BlockOptions {
        BlockOptions {
            indent: self.indent.clone(),
            include_attributes: self.block.include_attributes,
        }
    }

    pub fn json_options(&self) -> JsonOptions {
        JsonOptions {
            indent: self.indent.clone(),
            guard_empty_declarations: self.json.guard_empty_declarations,
        }
    }
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BlockconfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BlockconfConfig, ConfigError> {
    Loader::new().build()
}
