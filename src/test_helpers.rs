//! Shared test fixtures for the image-versions test suite.
//!
//! Descriptors are returned fresh on every call so tests can mutate them
//! (composition enriches versions in place).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut output = mixed_descriptor();
//! let pipeline = compose_pipeline(&landscape_source(), &mut output).unwrap();
//! assert_eq!(pipeline.version_stages().len(), 10);
//! ```

use crate::config::default_versions;
use crate::types::{OutputDescriptor, SourceImage, Version};

// =========================================================================
// Sources
// =========================================================================

/// 5184x2623 landscape photo.
pub fn landscape_source() -> SourceImage {
    SourceImage::new("./assets/horizontal.jpg", 5184, 2623)
}

/// 2448x3264 portrait photo.
pub fn portrait_source() -> SourceImage {
    SourceImage::new("./assets/vertical.jpg", 2448, 3264)
}

// =========================================================================
// Descriptors
// =========================================================================

/// Full-size plus a 3:2 crop at 1200.
pub fn two_version_descriptor() -> OutputDescriptor {
    OutputDescriptor::new(vec![
        Version::bounded("-full", 1920, 1920),
        Version::bounded("-1200", 1200, 1200).with_aspect("3:2"),
    ])
}

/// The stock ten versions with a few per-version overrides mixed in:
/// a webp output, a local quality, and a local prefix.
pub fn mixed_descriptor() -> OutputDescriptor {
    let mut versions = default_versions();
    versions[2].format = Some("webp".into());
    versions[5].quality = Some(60);
    versions[8].prefix = Some("sq-".into());
    OutputDescriptor::new(versions)
}

// =========================================================================
// Assertions
// =========================================================================

/// Final `(width, height)` of every version. Panics if composition has not
/// filled them in.
pub fn dimensions(output: &OutputDescriptor) -> Vec<(u32, u32)> {
    output
        .versions
        .iter()
        .enumerate()
        .map(|(i, v)| match (v.width, v.height) {
            (Some(w), Some(h)) => (w, h),
            _ => panic!("version {i} has no dimensions; was it composed?"),
        })
        .collect()
}

/// Output path of every version. Panics on a version without one.
pub fn paths(output: &OutputDescriptor) -> Vec<&str> {
    output
        .versions
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.path
                .as_deref()
                .unwrap_or_else(|| panic!("version {i} has no path; was it composed?"))
        })
        .collect()
}
