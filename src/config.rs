//! Configuration module.
//!
//! Handles loading, validating, and merging `resize.toml` files. Stock
//! defaults are overridden by whatever keys the user file sets; everything
//! else keeps its default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [execution]
//! program = "convert"       # ImageMagick entry point ("convert" or "magick")
//! timeout_ms = 30000        # Wall-clock budget for one pipeline
//!
//! [output]
//! # path = "out"            # Output directory (default: next to the source)
//! # prefix = "im-"          # Prefix for every version without its own
//! # quality = 80            # Quality for every version without its own
//!
//! [processing]
//! # max_processes = 4       # Parallel images (omit for auto = CPU cores)
//!
//! [[versions]]
//! suffix = "-full"
//! max_width = 1920
//! max_height = 1920
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Tables merge key by key; arrays (including
//! `versions`) replace the default list entirely:
//!
//! ```toml
//! [execution]
//! timeout_ms = 60000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{AspectSpec, RunOptions};
use crate::types::{OutputDescriptor, Version};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "resize.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML render error: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `resize.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How the composed pipeline is run.
    pub execution: ExecutionConfig,
    /// Descriptor-level defaults for every version.
    pub output: OutputConfig,
    /// Parallel processing settings (CLI only).
    pub processing: ProcessingConfig,
    /// Versions derived from every source image.
    pub versions: Vec<Version>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            execution: ExecutionConfig::default(),
            output: OutputConfig::default(),
            processing: ProcessingConfig::default(),
            versions: default_versions(),
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.execution.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "execution.program must not be empty".into(),
            ));
        }
        if self.execution.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "execution.timeout_ms must be greater than 0".into(),
            ));
        }
        if let Some(q) = self.output.quality {
            validate_quality(q, "output.quality")?;
        }
        if self.versions.is_empty() {
            return Err(ConfigError::Validation("versions must not be empty".into()));
        }
        for (i, version) in self.versions.iter().enumerate() {
            if let Some(q) = version.quality {
                validate_quality(q, &format!("versions[{i}].quality"))?;
            }
            AspectSpec::parse_optional(version.aspect.as_deref())
                .map_err(|e| ConfigError::Validation(format!("versions[{i}].aspect: {e}")))?;
        }
        Ok(())
    }

    /// Build a fresh output descriptor from the configured defaults.
    pub fn descriptor(&self) -> OutputDescriptor {
        OutputDescriptor {
            versions: self.versions.clone(),
            path: self.output.path.clone(),
            prefix: self.output.prefix.clone(),
            quality: self.output.quality,
        }
    }
}

fn validate_quality(quality: u32, key: &str) -> Result<(), ConfigError> {
    if !(1..=100).contains(&quality) {
        return Err(ConfigError::Validation(format!("{key} must be 1-100")));
    }
    Ok(())
}

/// Pipeline execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// ImageMagick entry point placed at the head of the pipeline.
    pub program: String,
    /// Hard wall-clock limit in milliseconds; the process is killed past it.
    pub timeout_ms: u64,
}

impl ExecutionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            program: self.program.clone(),
            timeout: self.timeout(),
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            program: "convert".to_string(),
            timeout_ms: 30_000,
        }
    }
}

/// Descriptor-level defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of images processed at once.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// The stock version set: a full-size copy, four 3:2 crops, a small uncropped
/// preview, forced landscape and portrait crops, and two squares.
pub fn default_versions() -> Vec<Version> {
    vec![
        Version::bounded("-full", 1920, 1920),
        Version::bounded("-1200", 1200, 1200).with_aspect("3:2"),
        Version::bounded("-800", 800, 800).with_aspect("3:2"),
        Version::bounded("-500", 500, 500).with_aspect("3:2"),
        Version::bounded("-260", 260, 260).with_aspect("3:2"),
        Version::bounded("-150", 150, 150).with_aspect("3:2"),
        Version::bounded("-horizontal-500", 500, 500).with_aspect("3:2!h"),
        Version::bounded("-vertical-500", 500, 500).with_aspect("3:2!v"),
        Version::bounded("-square-200", 200, 200).with_aspect("1:1"),
        Version::bounded("-square-50", 50, 50).with_aspect("1:1"),
    ]
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The built-in config rendered as a TOML table. A user's `resize.toml` is
/// laid over this.
pub fn default_table() -> Result<toml::Table, ConfigError> {
    let text = toml::to_string(&Config::default())?;
    Ok(text.parse()?)
}

/// Lay the user's table over `base`.
///
/// Sections such as `[execution]` combine key by key, so setting
/// `timeout_ms` keeps the default `program`. Anything else the user sets
/// wins outright; a `[[versions]]` list replaces the stock ten.
pub fn overlay(base: &mut toml::Table, user: toml::Table) {
    for (key, value) in user {
        let value = match (base.remove(&key), value) {
            (Some(toml::Value::Table(mut section)), toml::Value::Table(user_section)) => {
                overlay(&mut section, user_section);
                toml::Value::Table(section)
            }
            (_, value) => value,
        };
        base.insert(key, value);
    }
}

/// Read a user config file. A missing file contributes nothing.
pub fn read_user_table(file: &Path) -> Result<Option<toml::Table>, ConfigError> {
    match fs::read_to_string(file) {
        Ok(text) => Ok(Some(text.parse()?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Deserialize a fully layered table and validate it.
pub fn config_from_table(table: toml::Table) -> Result<Config, ConfigError> {
    let config: Config = toml::Value::Table(table).try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `resize.toml` from the given directory, falling back to defaults.
pub fn load_config(root: &Path) -> Result<Config, ConfigError> {
    load_config_file(&root.join(CONFIG_FILE))
}

/// Load an explicit config file. A missing file yields the stock defaults.
pub fn load_config_file(file: &Path) -> Result<Config, ConfigError> {
    let mut table = default_table()?;
    if let Some(user) = read_user_table(file)? {
        overlay(&mut table, user);
    }
    config_from_table(table)
}

/// Returns a fully-commented stock `resize.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# image-versions configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Execution
# ---------------------------------------------------------------------------
[execution]
# ImageMagick entry point. Use "magick" for ImageMagick 7 installs without
# the legacy "convert" shim.
program = "convert"

# Wall-clock budget for one image's pipeline, in milliseconds. The process is
# killed when it runs over and the image is reported as failed.
timeout_ms = 30000

# ---------------------------------------------------------------------------
# Output defaults (apply to versions that don't set their own)
# ---------------------------------------------------------------------------
[output]
# Directory versions are written to. Default: next to the source image.
# path = "out"

# Prefix for every file name, e.g. "im-" → im-photo-full.jpg
# prefix = ""

# Encoding quality, 1-100. Versions without a quality fall back to this,
# then to 80.
# quality = 80

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum images processed in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Versions
# ---------------------------------------------------------------------------
# Each [[versions]] entry is one derived image. Keys:
#   max_width, max_height  fit-within bounds (either or both; 0 = unset)
#   aspect                 crop ratio "W:H", "W:H!h" (landscape), "W:H!v" (portrait)
#   quality                1-100
#   background, flatten    flatten transparency onto a color
#   format                 output extension, e.g. "jpg", "webp"
#   prefix, suffix         added around the source file name

[[versions]]
suffix = "-full"
max_width = 1920
max_height = 1920

[[versions]]
suffix = "-1200"
max_width = 1200
max_height = 1200
aspect = "3:2"

[[versions]]
suffix = "-800"
max_width = 800
max_height = 800
aspect = "3:2"

[[versions]]
suffix = "-500"
max_width = 500
max_height = 500
aspect = "3:2"

[[versions]]
suffix = "-260"
max_width = 260
max_height = 260
aspect = "3:2"

[[versions]]
suffix = "-150"
max_width = 150
max_height = 150
aspect = "3:2"

[[versions]]
suffix = "-horizontal-500"
max_width = 500
max_height = 500
aspect = "3:2!h"

[[versions]]
suffix = "-vertical-500"
max_width = 500
max_height = 500
aspect = "3:2!v"

[[versions]]
suffix = "-square-200"
max_width = 200
max_height = 200
aspect = "1:1"

[[versions]]
suffix = "-square-50"
max_width = 50
max_height = 50
aspect = "1:1"
"##
}
