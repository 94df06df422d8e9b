//! The composed ImageMagick pipeline.
//!
//! A [`Pipeline`] is one `convert` invocation made of stages. The first stage
//! decodes the source, auto-orients it, strips metadata and parks the result in
//! an in-memory [`Register`] (`mpr:`). Every version stage then recalls that
//! register, so the source is decoded exactly once:
//!
//! ```text
//! convert ./a.jpg -auto-orient -strip -write mpr:./a.jpg +delete   ← preprocess
//!   mpr:./a.jpg -quality 80 -resize "1920x1920" -write a-full.jpg +delete
//!   mpr:./a.jpg -quality 80 -crop "..." -resize "500x500" a-500.jpg  ← last
//! ```
//!
//! Buffer ownership follows the stage outputs: an [`Output::Intermediate`]
//! writes its working copy and releases it (`+delete`), so at most one master
//! plus one working buffer are alive at a time. Only the final stage keeps its
//! buffer, since `convert` writes the remaining image as it exits.

use super::params::{CropGeometry, Quality, ResizeSpec};
use crate::types::SourceImage;
use std::fmt;

/// Handle to the shared, decoded and auto-oriented master image.
///
/// Produced once by the preprocessing stage and borrowed by every version
/// stage; version stages only ever read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    key: String,
}

impl Register {
    /// The register for `image`, keyed by its source path.
    pub fn for_source(image: &SourceImage) -> Self {
        Self {
            key: image.path.clone(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mpr:{}", shell_word(&self.key))
    }
}

/// Where a stage's working image goes when the stage ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Park the image in the shared register, then release the working copy.
    Store(Register),
    /// Write to a file, then release the working copy.
    Intermediate(String),
    /// Write to a file as the last act of the invocation.
    Final(String),
}

impl Output {
    /// File path written by this output, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Output::Store(_) => None,
            Output::Intermediate(path) | Output::Final(path) => Some(path),
        }
    }

    /// Whether the working buffer is released after writing.
    pub fn releases_buffer(&self) -> bool {
        !matches!(self, Output::Final(_))
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Store(register) => write!(f, "-write {register} +delete"),
            Output::Intermediate(path) => write!(f, "-write {} +delete", shell_word(path)),
            Output::Final(path) => f.write_str(&shell_word(path)),
        }
    }
}

/// A single operation within a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// Decode a file from disk.
    Read(String),
    /// Start from a copy of the shared master.
    Recall(Register),
    AutoOrient,
    Strip,
    Quality(Quality),
    Background(String),
    Flatten,
    Crop(CropGeometry),
    Resize(ResizeSpec),
    Write(Output),
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Read(path) => f.write_str(&shell_word(path)),
            Op::Recall(register) => write!(f, "{register}"),
            Op::AutoOrient => f.write_str("-auto-orient"),
            Op::Strip => f.write_str("-strip"),
            Op::Quality(q) => write!(f, "-quality {}", q.value()),
            Op::Background(color) => write!(f, "-background {}", shell_word(color)),
            Op::Flatten => f.write_str("-flatten"),
            Op::Crop(geometry) => write!(f, "-crop \"{geometry}\""),
            Op::Resize(spec) => write!(f, "-resize \"{spec}\""),
            Op::Write(output) => write!(f, "{output}"),
        }
    }
}

/// An ordered run of operations ending in an [`Op::Write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub ops: Vec<Op>,
}

impl Stage {
    pub fn new(ops: Vec<Op>) -> Self {
        Self { ops }
    }

    /// The stage's output action.
    pub fn output(&self) -> Option<&Output> {
        match self.ops.last() {
            Some(Op::Write(output)) => Some(output),
            _ => None,
        }
    }

    /// True for the stage whose output is the invocation's final write.
    pub fn is_terminal(&self) -> bool {
        matches!(self.output(), Some(Output::Final(_)))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// A complete single-invocation command: program, preprocessing stage, then
/// one stage per version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pub program: String,
    pub stages: Vec<Stage>,
}

impl Pipeline {
    pub const DEFAULT_PROGRAM: &'static str = "convert";

    pub fn new(preprocess: Stage) -> Self {
        Self {
            program: Self::DEFAULT_PROGRAM.to_string(),
            stages: vec![preprocess],
        }
    }

    /// Replace the ImageMagick entry point (e.g. `magick`).
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Stages after the preprocessing stage, one per version.
    pub fn version_stages(&self) -> &[Stage] {
        self.stages.get(1..).unwrap_or_default()
    }

    /// Output paths in write order.
    pub fn output_paths(&self) -> Vec<&str> {
        self.stages
            .iter()
            .filter_map(|s| s.output().and_then(Output::path))
            .collect()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for stage in &self.stages {
            write!(f, " {stage}")?;
        }
        Ok(())
    }
}

/// Quote `word` for `sh` only when it contains characters the shell would
/// interpret. Plain paths render unchanged.
pub(crate) fn shell_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:+@%,=".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
