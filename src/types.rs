//! Shared types passed between callers, the composer and the CLI.
//!
//! [`Version`] doubles as request and result: callers fill in the request
//! fields, and composing a pipeline fills in `path`, `quality`, `width` and
//! `height`. Both halves serialize, so a version list can be read from
//! `resize.toml` and the enriched list written back out as JSON.

use serde::{Deserialize, Serialize};

/// The image every version is derived from.
///
/// `width` and `height` are the raw stored dimensions, *before* any EXIF
/// orientation is applied. All crop and resize math runs on these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl SourceImage {
    pub fn new(path: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }
}

/// One derived output image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Version {
    /// Upper bound on the output width. `0` counts as unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    /// Upper bound on the output height. `0` counts as unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    /// Aspect ratio to crop to, e.g. `"3:2"`, `"1:1"`, `"3:2!v"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,
    /// Encoding quality (1-100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
    /// Background color used when flattening transparency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flatten: Option<bool>,
    /// Output format extension, e.g. `"jpg"` or `"webp"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// Output path, set during composition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Final pixel width, set during composition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Final pixel height, set during composition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Version {
    /// A version bounded to `max_width × max_height` with the given suffix.
    pub fn bounded(suffix: &str, max_width: u32, max_height: u32) -> Self {
        Self {
            suffix: Some(suffix.to_string()),
            max_width: Some(max_width),
            max_height: Some(max_height),
            ..Self::default()
        }
    }

    pub fn with_aspect(mut self, aspect: &str) -> Self {
        self.aspect = Some(aspect.to_string());
        self
    }
}

/// The list of versions to derive plus descriptor-level defaults.
///
/// `path`, `prefix` and `quality` apply to every version that does not set
/// its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputDescriptor {
    pub versions: Vec<Version>,
    /// Output directory. Defaults to the source image's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
}

impl OutputDescriptor {
    pub fn new(versions: Vec<Version>) -> Self {
        Self {
            versions,
            ..Self::default()
        }
    }
}

/// Three-tier default resolution: local value, then descriptor default, then
/// the hardcoded fallback.
pub fn resolve<T: Clone>(local: Option<&T>, descriptor: Option<&T>, fallback: T) -> T {
    local.or(descriptor).cloned().unwrap_or(fallback)
}
