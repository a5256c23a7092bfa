//! Shared configuration loader for the vellum toolchain.
//!
//! `defaults/vellum.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`VellumConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use vellum_convert::AssembleOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/vellum.default.toml");

/// Top-level configuration consumed by vellum applications.
#[derive(Debug, Clone, Deserialize)]
pub struct VellumConfig {
    pub page: PageConfig,
    pub furniture: FurnitureConfig,
    pub toc: TocConfig,
    pub html: HtmlConfig,
}

/// Page geometry, in twentieths of a point.
#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub facing_pages: bool,
}

/// Running header/footer content.
#[derive(Debug, Clone, Deserialize)]
pub struct FurnitureConfig {
    pub header: String,
    pub footer: String,
    pub page_numbers: bool,
}

/// Table-of-contents knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct TocConfig {
    pub include: bool,
    pub chars_per_page: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub theme: String,
}

impl From<&VellumConfig> for AssembleOptions {
    fn from(config: &VellumConfig) -> Self {
        let none_if_empty = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        AssembleOptions {
            page_width: config.page.width,
            page_height: config.page.height,
            margin: config.page.margin,
            facing_pages: config.page.facing_pages,
            header_text: none_if_empty(&config.furniture.header),
            footer_text: none_if_empty(&config.furniture.footer),
            page_numbers: config.furniture.page_numbers,
            include_toc: config.toc.include,
            chars_per_page: config.toc.chars_per_page,
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
    pub fn build(self) -> Result<VellumConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<VellumConfig, ConfigError> {
    Loader::new().build()
}
