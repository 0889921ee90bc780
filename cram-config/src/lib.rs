//! Shared configuration loader for the cram toolchain.
//!
//! `defaults/cram.default.toml` is embedded into every binary so documented
//! defaults and runtime behavior stay in sync. Applications layer
//! user-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`CramConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use cram_html::Theme;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/cram.default.toml");

/// Top-level configuration consumed by cram applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CramConfig {
    pub grammar: GrammarConfig,
    pub resolve: ResolveConfig,
    pub html: HtmlConfig,
}

/// Grammar acceptance knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct GrammarConfig {
    /// Accept the bare `/+` card closer, reported as a warning.
    pub lenient_card_close: bool,
}

/// Resolution-stage knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveConfig {
    pub synthesize_annotation_cards: bool,
}

/// HTML export knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub theme: Theme,
    pub title: String,
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

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CramConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CramConfig, ConfigError> {
    Loader::new().build()
}
