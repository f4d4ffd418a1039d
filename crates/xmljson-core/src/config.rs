//! Configuration types for xmljson.
//!
//! [`Config::load`] reads `~/.config/xmljson/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::batch::ConvertOptions;
use crate::xml::ParseOptions;
use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[convert]
allow_dtd     = true
max_depth     = 1024
parser_detail = false

[input]
allow_multiple = true

[ui]
show_results = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/xmljson/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[convert]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_allow_dtd")]
    pub allow_dtd: bool,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub parser_detail: bool,
}

fn default_allow_dtd() -> bool { true }
fn default_max_depth() -> usize { 1024 }

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            allow_dtd: default_allow_dtd(),
            max_depth: default_max_depth(),
            parser_detail: false,
        }
    }
}

impl ConvertConfig {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            parse: ParseOptions {
                allow_dtd: self.allow_dtd,
                max_depth: self.max_depth,
            },
            parser_detail: self.parser_detail,
        }
    }
}

/// `[input]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_allow_multiple")]
    pub allow_multiple: bool,
}

fn default_allow_multiple() -> bool { true }

impl Default for InputConfig {
    fn default() -> Self {
        Self { allow_multiple: default_allow_multiple() }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_results")]
    pub show_results: bool,
}

fn default_show_results() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self { show_results: default_show_results() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/xmljson/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::debug!(path = %path.display(), "wrote default config");
        }

        Self::from_sources(Some(path))
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self {
            convert: ConvertConfig::default(),
            input: InputConfig::default(),
            ui: UiConfig::default(),
        }
    }

    /// Parse a TOML document layered over the built-in defaults.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    fn from_sources(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_path()).required(false));
        }
        builder.build()?.try_deserialize().map_err(Into::into)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("xmljson")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
