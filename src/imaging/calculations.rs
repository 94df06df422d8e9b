//! Pure calculation functions for crop and resize geometry.
//!
//! All functions here are pure and testable without any I/O or images. Every
//! computation is done in exact integer arithmetic so results never depend on
//! floating-point behaviour.

use super::params::{AspectSpec, CropGeometry, InvalidAspectSpec, Orientation, ResizeSpec};
use crate::types::SourceImage;

/// Outcome of cropping a source to an aspect ratio.
///
/// `width`/`height` are always the post-crop dimensions; they equal the
/// source dimensions when `geometry` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropResult {
    pub geometry: Option<CropGeometry>,
    pub width: u32,
    pub height: u32,
}

impl CropResult {
    fn uncropped(width: u32, height: u32) -> Self {
        Self {
            geometry: None,
            width,
            height,
        }
    }
}

/// Outcome of fitting crop dimensions to a version's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeResult {
    /// `None` only when neither bound is set.
    pub spec: Option<ResizeSpec>,
    /// Final pixel width after the resize.
    pub width: u32,
    /// Final pixel height after the resize.
    pub height: u32,
}

/// Compute the crop needed for `source` to match `aspect`.
///
/// `None` or a blank string means no crop. Malformed specs fail with
/// [`InvalidAspectSpec`].
///
/// # Examples
/// ```
/// # use image_versions::imaging::compute_crop;
/// # use image_versions::types::SourceImage;
/// let image = SourceImage::new("horizontal.jpg", 5184, 2623);
/// let crop = compute_crop(&image, Some("3:2")).unwrap();
/// assert_eq!(crop.geometry.unwrap().to_string(), "3936x2623+624+0");
/// assert_eq!((crop.width, crop.height), (3936, 2623));
/// ```
pub fn compute_crop(
    source: &SourceImage,
    aspect: Option<&str>,
) -> Result<CropResult, InvalidAspectSpec> {
    Ok(match AspectSpec::parse_optional(aspect)? {
        Some(spec) => calculate_crop(source.width, source.height, spec),
        None => CropResult::uncropped(source.width, source.height),
    })
}

/// Largest centered rectangle of `spec`'s ratio inside `width × height`.
///
/// The exact rectangle spans one full axis; the other axis is offset by
/// `floor((side - exact) / 2)` and the rectangle is kept symmetric around the
/// center, so it is `side - 2 * offset` long. Zero offsets mean the source
/// already has the ratio and no crop is emitted.
pub fn calculate_crop(width: u32, height: u32, spec: AspectSpec) -> CropResult {
    let orientation = Orientation::of(width, height).target(spec.mode);
    let (rw, rh) = spec.ratio_for(orientation);
    let (w, h, rw, rh) = (width as u128, height as u128, rw as u128, rh as u128);

    let (x, y) = if w * rh <= h * rw {
        // Full width fits: exact height = w * rh / rw
        (0, (h * rw - w * rh) / (2 * rw))
    } else {
        // Full height: exact width = h * rw / rh
        ((w * rh - h * rw) / (2 * rh), 0)
    };

    if x == 0 && y == 0 {
        return CropResult::uncropped(width, height);
    }

    let geometry = CropGeometry {
        width: width - 2 * x as u32,
        height: height - 2 * y as u32,
        x: x as u32,
        y: y as u32,
    };

    CropResult {
        geometry: Some(geometry),
        width: geometry.width,
        height: geometry.height,
    }
}

/// Fit `width × height` into the given bounds.
///
/// A bound of `0` counts as unset. With one bound the other axis follows the
/// aspect ratio; with both, the image is scaled by `min(mw / w, mh / h)` so the
/// limiting axis lands exactly on its bound. Images are enlarged when smaller
/// than the bounds.
///
/// # Examples
/// ```
/// # use image_versions::imaging::compute_resize;
/// let r = compute_resize((800, 533), Some(500), Some(500));
/// assert_eq!(r.spec.unwrap().to_string(), "500x500");
/// assert_eq!((r.width, r.height), (500, 333));
/// ```
pub fn compute_resize(
    (width, height): (u32, u32),
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> ResizeResult {
    let max_width = max_width.filter(|&v| v > 0);
    let max_height = max_height.filter(|&v| v > 0);

    let (spec, width, height) = match (max_width, max_height) {
        (None, None) => (None, width, height),
        (Some(mw), None) => (
            Some(ResizeSpec::Width(mw)),
            mw,
            scale_round(height, mw, width),
        ),
        (None, Some(mh)) => (
            Some(ResizeSpec::Height(mh)),
            scale_round(width, mh, height),
            mh,
        ),
        (Some(mw), Some(mh)) => {
            let spec = ResizeSpec::Fit {
                width: mw,
                height: mh,
            };
            // mw / w <= mh / h  ⇔  mw * h <= mh * w
            if mw as u64 * height as u64 <= mh as u64 * width as u64 {
                (Some(spec), mw, scale_round(height, mw, width))
            } else {
                (Some(spec), scale_round(width, mh, height), mh)
            }
        }
    };

    ResizeResult {
        spec,
        width,
        height,
    }
}

/// `round(value * numerator / denominator)`, half rounding up, minimum 1.
pub(crate) fn scale_round(value: u32, numerator: u32, denominator: u32) -> u32 {
    let (v, n, d) = (value as u128, numerator as u128, denominator.max(1) as u128);
    let rounded = (2 * v * n + d) / (2 * d);
    rounded.clamp(1, u32::MAX as u128) as u32
}
