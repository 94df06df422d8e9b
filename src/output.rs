//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every source image is shown as a header line (path and raw dimensions)
//! followed by one indented line per version: positional index, output path,
//! final dimensions, then the settings that shaped it. Failures replace the
//! version list with the error.
//!
//! # Output Format
//!
//! ## Resize
//!
//! ```text
//! ./assets/horizontal.jpg (5184x2623)
//!     001 assets/horizontal-full.jpg 1920x971 q80
//!     002 assets/horizontal-1200.jpg 1200x800 q80 3:2
//!
//! ./assets/broken.jpg (640x480)
//!     failed: pipeline execution failed: convert: improper image header
//!
//! Resized 1 image, 1 failed
//! ```
//!
//! ## Plan
//!
//! ```text
//! ./assets/horizontal.jpg (5184x2623)
//!     001 assets/horizontal-full.jpg 1920x971 q80
//!     002 assets/horizontal-1200.jpg 1200x800 q80 3:2
//! Command
//!     convert ./assets/horizontal.jpg -auto-orient -strip ...
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::imaging::{Pipeline, ResizeError};
use crate::types::{SourceImage, Version};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for a source image.
///
/// ```text
/// ./assets/horizontal.jpg (5184x2623)
/// ```
fn source_header(image: &SourceImage) -> String {
    format!("{} ({}x{})", image.path, image.width, image.height)
}

/// One version: index, path, dimensions, then quality, aspect and format
/// details when present.
///
/// ```text
/// 002 assets/horizontal-1200.jpg 1200x800 q80 3:2
/// 003 (unnamed) ?x?
/// ```
fn version_line(index: usize, version: &Version) -> String {
    let mut line = format!(
        "{} {}",
        format_index(index),
        version.path.as_deref().unwrap_or("(unnamed)")
    );
    match (version.width, version.height) {
        (Some(w), Some(h)) => line.push_str(&format!(" {w}x{h}")),
        _ => line.push_str(" ?x?"),
    }
    if let Some(q) = version.quality {
        line.push_str(&format!(" q{q}"));
    }
    if let Some(aspect) = version.aspect.as_deref().filter(|a| !a.trim().is_empty()) {
        line.push_str(&format!(" {aspect}"));
    }
    if version.flatten == Some(true) {
        match &version.background {
            Some(bg) => line.push_str(&format!(" flatten on {bg}")),
            None => line.push_str(" flatten"),
        }
    }
    line
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Resize output
// ============================================================================

/// Format the outcome of resizing one image.
pub fn format_resize_result(
    image: &SourceImage,
    result: &Result<Vec<Version>, ResizeError>,
) -> Vec<String> {
    let mut lines = vec![source_header(image)];
    match result {
        Ok(versions) => {
            for (i, version) in versions.iter().enumerate() {
                lines.push(format!("{}{}", indent(1), version_line(i + 1, version)));
            }
        }
        Err(e) => lines.push(format!("{}failed: {}", indent(1), e)),
    }
    lines
}

/// One-line summary of a resize run.
pub fn format_summary(succeeded: usize, failed: usize) -> String {
    if failed == 0 {
        format!("Resized {}", plural(succeeded, "image"))
    } else {
        format!("Resized {}, {} failed", plural(succeeded, "image"), failed)
    }
}

pub fn print_resize_result(image: &SourceImage, result: &Result<Vec<Version>, ResizeError>) {
    for line in format_resize_result(image, result) {
        println!("{}", line);
    }
}

// ============================================================================
// Plan output
// ============================================================================

/// Format a composed-but-not-executed pipeline.
pub fn format_plan(image: &SourceImage, versions: &[Version], pipeline: &Pipeline) -> Vec<String> {
    let mut lines = vec![source_header(image)];
    for (i, version) in versions.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), version_line(i + 1, version)));
    }
    lines.push("Command".to_string());
    lines.push(format!("{}{}", indent(1), pipeline));
    lines
}

pub fn print_plan(image: &SourceImage, versions: &[Version], pipeline: &Pipeline) {
    for line in format_plan(image, versions, pipeline) {
        println!("{}", line);
    }
}
