//! # Image Versions
//!
//! Derive a set of resized and cropped versions from one source image with a
//! single ImageMagick invocation.
//!
//! # Architecture: Compose, Then Execute
//!
//! ```text
//! SourceImage + OutputDescriptor
//!     │  compute_crop / compute_resize   (pure geometry)
//!     │  compose_path                    (pure naming)
//!     ▼
//! Pipeline   convert src -auto-orient -strip -write mpr:src +delete
//!              mpr:src ... -write v1 +delete
//!              mpr:src ... vN
//!     │
//!     ▼
//! PipelineExecutor (shell, hard timeout) → Ok(&[Version]) | Err(ResizeError)
//! ```
//!
//! Everything up to the executor is a pure function of its inputs, so the
//! whole command can be asserted in unit tests without ImageMagick installed.
//! Composition enriches each [`types::Version`] in place with its resolved
//! quality, output path and final dimensions.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Geometry, pipeline composition and execution |
//! | [`naming`] | Output path composition (`dir/prefix + stem + suffix.ext`) |
//! | [`types`] | `SourceImage`, `Version`, `OutputDescriptor`, three-tier `resolve` |
//! | [`config`] | `resize.toml` loading, validation and merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Decode Per Source
//!
//! The source is decoded once and parked in an ImageMagick memory register
//! (`mpr:`). Every version stage recalls that register, works on its own
//! copy, writes it and releases it with `+delete`. Ten versions cost one
//! decode, not ten, and peak memory stays at the master plus one working
//! buffer.
//!
//! ## Integer Geometry
//!
//! Crop rectangles and resize targets are computed in integer arithmetic
//! (`u128` intermediates), so the numbers written into the command are exactly
//! the numbers reported back in `Version::width` / `Version::height`. Resize
//! rounds half up.
//!
//! ## Three-Tier Defaults
//!
//! Quality and prefix resolve per version as: the version's own value, then
//! the descriptor's, then a hardcoded fallback. This is one generic function,
//! [`types::resolve`].
//!
//! ## Stderr Is Failure
//!
//! ImageMagick reports many problems as warnings while still exiting 0. Any
//! non-empty stderr output fails the image, with the text attached verbatim.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod types;

pub use imaging::{ResizeError, compose_pipeline, compose_version_stage, resize, resize_with};
pub use naming::compose_path;

#[cfg(test)]
pub(crate) mod test_helpers;
