//! Parameter types for the geometry engine.
//!
//! These types describe *what* a version wants (a ratio, a crop rectangle, a
//! resize box), not *how* ImageMagick is told to do it. Rendering to command
//! tokens happens through their `Display` impls, which produce exactly the
//! geometry strings `convert` understands.
//!
//! ## Types
//!
//! - [`AspectSpec`]: a parsed `"W:H"` ratio with optional `!h` / `!v` modifier.
//! - [`Orientation`]: landscape or portrait, plus the decision table that maps
//!   a source orientation and an [`AspectMode`] to the crop orientation.
//! - [`CropGeometry`]: a centered crop rectangle, renders as `WxH+X+Y`.
//! - [`ResizeSpec`]: width-only, height-only or fit-within box.
//! - [`Quality`]: lossy encoding quality (1–100, default 80). Clamped on construction.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// A malformed aspect-ratio string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid aspect spec {spec:?}: {reason}")]
pub struct InvalidAspectSpec {
    pub spec: String,
    pub reason: &'static str,
}

/// How the ratio's long side is assigned to an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectMode {
    /// Follow the source image's own orientation.
    Auto,
    /// `!h`: long side on the width.
    Horizontal,
    /// `!v`: long side on the height.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Square images count as landscape.
    pub fn of(width: u32, height: u32) -> Self {
        if width >= height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Crop orientation for a source of this orientation under `mode`.
    ///
    /// | source    | Auto      | Horizontal | Vertical |
    /// |-----------|-----------|------------|----------|
    /// | landscape | landscape | landscape  | portrait |
    /// | portrait  | portrait  | landscape  | portrait |
    pub fn target(self, mode: AspectMode) -> Orientation {
        match (self, mode) {
            (_, AspectMode::Horizontal) => Orientation::Landscape,
            (_, AspectMode::Vertical) => Orientation::Portrait,
            (source, AspectMode::Auto) => source,
        }
    }
}

/// A parsed aspect ratio such as `3:2`, `1:1!v` or `16:9!h`.
///
/// The ratio is stored normalised with the long side first, so `2:3` and
/// `3:2` are the same spec. The [`AspectMode`] alone decides which axis gets
/// the long side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectSpec {
    pub long: u32,
    pub short: u32,
    pub mode: AspectMode,
}

impl AspectSpec {
    /// Parse an optional aspect string. `None` and blank strings mean "no crop".
    pub fn parse_optional(spec: Option<&str>) -> Result<Option<Self>, InvalidAspectSpec> {
        match spec.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }

    /// `(width, height)` terms of the ratio for the given crop orientation.
    pub fn ratio_for(self, orientation: Orientation) -> (u32, u32) {
        match orientation {
            Orientation::Landscape => (self.long, self.short),
            Orientation::Portrait => (self.short, self.long),
        }
    }
}

impl FromStr for AspectSpec {
    type Err = InvalidAspectSpec;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidAspectSpec {
            spec: s.to_string(),
            reason,
        };

        let s_trimmed = s.trim();
        let (ratio, mode) = match s_trimmed.split_once('!') {
            None => (s_trimmed, AspectMode::Auto),
            Some((ratio, "h")) => (ratio, AspectMode::Horizontal),
            Some((ratio, "v")) => (ratio, AspectMode::Vertical),
            Some(_) => return Err(invalid("modifier must be !h or !v")),
        };

        let (w, h) = ratio
            .split_once(':')
            .ok_or_else(|| invalid("expected W:H"))?;
        let w: u32 = w
            .trim()
            .parse()
            .map_err(|_| invalid("ratio terms must be positive integers"))?;
        let h: u32 = h
            .trim()
            .parse()
            .map_err(|_| invalid("ratio terms must be positive integers"))?;
        if w == 0 || h == 0 {
            return Err(invalid("ratio terms must be non-zero"));
        }

        Ok(AspectSpec {
            long: w.max(h),
            short: w.min(h),
            mode,
        })
    }
}

/// A centered crop rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropGeometry {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for CropGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Target of a `-resize` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeSpec {
    /// Width fixed, height follows the aspect ratio. Renders as `W`.
    Width(u32),
    /// Height fixed, width follows the aspect ratio. Renders as `xH`.
    Height(u32),
    /// Largest size fitting inside the box. Renders as `WxH`.
    Fit { width: u32, height: u32 },
}

impl fmt::Display for ResizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeSpec::Width(w) => write!(f, "{w}"),
            ResizeSpec::Height(h) => write!(f, "x{h}"),
            ResizeSpec::Fit { width, height } => write!(f, "{width}x{height}"),
        }
    }
}
