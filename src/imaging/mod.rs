//! Image version derivation on top of ImageMagick.
//!
//! | Operation | Where |
//! |---|---|
//! | **Identify** | `image::image_dimensions` (raw stored size) |
//! | **Crop geometry** | [`compute_crop`], integer arithmetic |
//! | **Resize geometry** | [`compute_resize`], half-up rounding |
//! | **Compose** | [`compose_pipeline`] → one `convert` command |
//! | **Execute** | [`PipelineExecutor`] + [`ShellExecutor`] (tokio, hard timeout) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Aspect specs, geometries, quality
//! - **Pipeline**: The composed command as data, rendered with `Display`
//! - **Backend**: [`PipelineExecutor`] trait + [`ShellExecutor`]
//! - **Operations**: High-level functions combining calculations + pipeline + backend

pub mod backend;
mod calculations;
pub mod magick_backend;
pub mod operations;
mod params;
pub mod pipeline;

pub use backend::{ExecutionError, PipelineExecutor};
pub use calculations::{CropResult, ResizeResult, calculate_crop, compute_crop, compute_resize};
pub use magick_backend::ShellExecutor;
pub use operations::{
    DEFAULT_QUALITY, DEFAULT_TIMEOUT, IdentifyError, ResizeError, RunOptions,
    compose_pipeline, compose_preprocess_stage, compose_version_stage, identify, resize,
    resize_with,
};
pub use params::{
    AspectMode, AspectSpec, CropGeometry, InvalidAspectSpec, Orientation, Quality, ResizeSpec,
};
pub use pipeline::{Op, Output, Pipeline, Register, Stage};
