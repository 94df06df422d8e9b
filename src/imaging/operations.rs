//! High-level image operations.
//!
//! These functions combine geometry calculations with pipeline composition
//! and, for [`resize`] / [`resize_with`], execution. Composition is pure: it
//! only fills in the [`Version`] fields (`path`, `quality`, `width`,
//! `height`) and returns a [`Pipeline`].

use super::backend::{ExecutionError, PipelineExecutor};
use super::calculations::{compute_crop, compute_resize};
use super::magick_backend::ShellExecutor;
use super::params::{AspectSpec, InvalidAspectSpec, Quality};
use super::pipeline::{Op, Output, Pipeline, Register, Stage};
use crate::naming::{PathOptions, compose_path};
use crate::types::{OutputDescriptor, SourceImage, Version, resolve};
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Quality used when neither the version nor the descriptor sets one.
pub const DEFAULT_QUALITY: u32 = 80;

/// Execution budget used by [`resize`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error(transparent)]
    InvalidAspectSpec(#[from] InvalidAspectSpec),
    #[error("pipeline execution failed: {diagnostic}")]
    PipelineExecutionFailed { diagnostic: String },
    #[error("pipeline timed out after {}ms", timeout.as_millis())]
    TimeoutExceeded { timeout: Duration },
}

impl ResizeError {
    /// True for every failure reported by the executor, timeouts included.
    pub fn is_execution_failure(&self) -> bool {
        matches!(
            self,
            ResizeError::PipelineExecutionFailed { .. } | ResizeError::TimeoutExceeded { .. }
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ResizeError::TimeoutExceeded { .. })
    }
}

impl From<ExecutionError> for ResizeError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::TimedOut { timeout } => ResizeError::TimeoutExceeded { timeout },
            ExecutionError::Spawn(e) => ResizeError::PipelineExecutionFailed {
                diagnostic: e.to_string(),
            },
            ExecutionError::Failed { code, diagnostic } => {
                let diagnostic = if diagnostic.trim().is_empty() {
                    match code {
                        Some(0) => "process wrote blank output to stderr".to_string(),
                        Some(code) => format!("process exited with code {code}"),
                        None => "process terminated by signal".to_string(),
                    }
                } else {
                    diagnostic
                };
                ResizeError::PipelineExecutionFailed { diagnostic }
            }
        }
    }
}

/// How [`resize_with`] runs the composed pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// ImageMagick entry point, e.g. `convert` or `magick`.
    pub program: String,
    pub timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            program: Pipeline::DEFAULT_PROGRAM.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Build the stage that decodes, auto-orients and strips the source, and
/// parks it in the shared register.
pub fn compose_preprocess_stage(image: &SourceImage) -> (Register, Stage) {
    let register = Register::for_source(image);
    let stage = Stage::new(vec![
        Op::Read(image.path.clone()),
        Op::AutoOrient,
        Op::Strip,
        Op::Write(Output::Store(register.clone())),
    ]);
    (register, stage)
}

/// Build the stage for one version.
///
/// Token order: register recall, quality, background, flatten, crop, resize,
/// output. Quality, background and flatten appear only when the version sets
/// them. The final dimensions are written back to `version.width` /
/// `version.height`; a version without a `path` gets one composed from its
/// own format, prefix and suffix.
pub fn compose_version_stage(
    register: &Register,
    image: &SourceImage,
    version: &mut Version,
    is_last: bool,
) -> Result<Stage, ResizeError> {
    let mut ops = vec![Op::Recall(register.clone())];

    if let Some(quality) = version.quality {
        ops.push(Op::Quality(Quality::new(quality)));
    }
    if let Some(background) = &version.background {
        ops.push(Op::Background(background.clone()));
    }
    if version.flatten == Some(true) {
        ops.push(Op::Flatten);
    }

    let crop = compute_crop(image, version.aspect.as_deref())?;
    if let Some(geometry) = crop.geometry {
        ops.push(Op::Crop(geometry));
    }

    let resized = compute_resize(
        (crop.width, crop.height),
        version.max_width,
        version.max_height,
    );
    if let Some(spec) = resized.spec {
        ops.push(Op::Resize(spec));
    }
    version.width = Some(resized.width);
    version.height = Some(resized.height);

    let path = match &version.path {
        Some(path) => path.clone(),
        None => {
            let path = compose_path(
                &image.path,
                &PathOptions {
                    format: version.format.as_deref(),
                    path: None,
                    prefix: version.prefix.as_deref().unwrap_or(""),
                    suffix: version.suffix.as_deref().unwrap_or(""),
                },
            );
            version.path = Some(path.clone());
            path
        }
    };

    let output = if is_last {
        Output::Final(path)
    } else {
        Output::Intermediate(path)
    };
    ops.push(Op::Write(output));

    Ok(Stage::new(ops))
}

/// Compose the full pipeline for `image` and enrich every version in place.
///
/// Per version: quality resolves local → descriptor → 80, prefix resolves
/// local → descriptor → `""`, suffix local → `""`, the directory comes from
/// the descriptor (else the source's directory).
///
/// Every aspect ratio is checked before any version is touched: on
/// [`ResizeError::InvalidAspectSpec`] the descriptor is left exactly as given.
pub fn compose_pipeline(
    image: &SourceImage,
    output: &mut OutputDescriptor,
) -> Result<Pipeline, ResizeError> {
    for version in &output.versions {
        AspectSpec::parse_optional(version.aspect.as_deref())?;
    }

    let (register, preprocess) = compose_preprocess_stage(image);
    let mut pipeline = Pipeline::new(preprocess);

    let last = output.versions.len().saturating_sub(1);
    for (index, version) in output.versions.iter_mut().enumerate() {
        let quality = resolve(version.quality.as_ref(), output.quality.as_ref(), DEFAULT_QUALITY);
        version.quality = Some(Quality::new(quality).value());

        let prefix = resolve(version.prefix.as_ref(), output.prefix.as_ref(), String::new());
        version.path = Some(compose_path(
            &image.path,
            &PathOptions {
                format: version.format.as_deref(),
                path: output.path.as_deref(),
                prefix: &prefix,
                suffix: version.suffix.as_deref().unwrap_or(""),
            },
        ));

        let stage = compose_version_stage(&register, image, version, index == last)?;
        debug!(index, %stage, "composed version stage");
        pipeline.push(stage);
    }

    Ok(pipeline)
}

/// Compose, execute and return the enriched versions.
///
/// No retries and no cleanup: a failed pipeline may leave some versions
/// written. An empty version list composes nothing and runs nothing.
pub fn resize_with<'a>(
    executor: &impl PipelineExecutor,
    image: &SourceImage,
    output: &'a mut OutputDescriptor,
    options: &RunOptions,
) -> Result<&'a [Version], ResizeError> {
    let pipeline = compose_pipeline(image, output)?.with_program(&options.program);

    if output.versions.is_empty() {
        debug!(source = %image.path, "no versions requested, nothing to run");
        return Ok(output.versions.as_slice());
    }

    let command = pipeline.to_string();
    debug!(%command, "composed pipeline");

    let start = Instant::now();
    if let Err(e) = executor.execute(&command, options.timeout) {
        warn!(source = %image.path, error = %e, "resize failed");
        return Err(e.into());
    }
    info!(
        source = %image.path,
        versions = output.versions.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "resized"
    );

    Ok(output.versions.as_slice())
}

/// Resize `image` into every version of `output` with the default shell
/// executor and timeout, then hand the outcome to `callback`.
pub fn resize<F>(image: &SourceImage, output: &mut OutputDescriptor, callback: F)
where
    F: FnOnce(Result<&[Version], ResizeError>),
{
    callback(resize_with(
        &ShellExecutor::new(),
        image,
        output,
        &RunOptions::default(),
    ));
}

#[derive(Error, Debug)]
#[error("could not identify {path}: {source}")]
pub struct IdentifyError {
    pub path: String,
    #[source]
    pub source: image::ImageError,
}

/// Read the raw stored dimensions of an image (no EXIF rotation applied).
pub fn identify(path: &Path) -> Result<SourceImage, IdentifyError> {
    let (width, height) = image::image_dimensions(path).map_err(|source| IdentifyError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(SourceImage::new(path.to_string_lossy(), width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockExecutor, MockOutcome};
    use crate::test_helpers::*;
    use std::collections::HashSet;

    fn small() -> (SourceImage, Register, Version) {
        let image = SourceImage::new("./a.jpg", 2000, 1000);
        let register = Register::for_source(&image);
        let version = Version {
            path: Some("a-b.jpg".into()),
            max_width: Some(500),
            max_height: Some(500),
            ..Version::default()
        };
        (image, register, version)
    }

    // =========================================================================
    // compose_version_stage tests
    // =========================================================================

    #[test]
    fn version_stage_intermediate() {
        let (image, register, mut version) = small();
        let stage = compose_version_stage(&register, &image, &mut version, false).unwrap();
        assert_eq!(
            stage.to_string(),
            "mpr:./a.jpg -resize \"500x500\" -write a-b.jpg +delete"
        );
        assert!(!stage.is_terminal());
    }

    #[test]
    fn version_stage_last() {
        let (image, register, mut version) = small();
        let stage = compose_version_stage(&register, &image, &mut version, true).unwrap();
        assert_eq!(stage.to_string(), "mpr:./a.jpg -resize \"500x500\" a-b.jpg");
        assert!(stage.is_terminal());
    }

    #[test]
    fn version_stage_with_quality() {
        let (image, register, mut version) = small();
        version.quality = Some(50);
        let stage = compose_version_stage(&register, &image, &mut version, false).unwrap();
        assert_eq!(
            stage.to_string(),
            "mpr:./a.jpg -quality 50 -resize \"500x500\" -write a-b.jpg +delete"
        );
    }

    #[test]
    fn version_stage_with_aspect_crops() {
        let (image, register, mut version) = small();
        version.aspect = Some("4:3".into());
        let stage = compose_version_stage(&register, &image, &mut version, false).unwrap();
        assert_eq!(
            stage.to_string(),
            "mpr:./a.jpg -crop \"1334x1000+333+0\" -resize \"500x500\" -write a-b.jpg +delete"
        );
    }

    #[test]
    fn version_stage_token_order() {
        let (image, register, mut version) = small();
        version.quality = Some(90);
        version.background = Some("red".into());
        version.flatten = Some(true);
        version.aspect = Some("1:1".into());
        let stage = compose_version_stage(&register, &image, &mut version, true).unwrap();
        assert_eq!(
            stage.to_string(),
            "mpr:./a.jpg -quality 90 -background red -flatten -crop \"1000x1000+500+0\" -resize \"500x500\" a-b.jpg"
        );
    }

    #[test]
    fn version_stage_flatten_false_is_omitted() {
        let (image, register, mut version) = small();
        version.flatten = Some(false);
        let stage = compose_version_stage(&register, &image, &mut version, true).unwrap();
        assert!(!stage.to_string().contains("-flatten"));
    }

    #[test]
    fn version_stage_without_bounds_has_no_resize() {
        let (image, register, _) = small();
        let mut version = Version {
            path: Some("a-sq.jpg".into()),
            aspect: Some("1:1".into()),
            ..Version::default()
        };
        let stage = compose_version_stage(&register, &image, &mut version, true).unwrap();
        assert_eq!(stage.to_string(), "mpr:./a.jpg -crop \"1000x1000+500+0\" a-sq.jpg");
        assert_eq!((version.width, version.height), (Some(1000), Some(1000)));
    }

    #[test]
    fn version_stage_sets_final_dimensions() {
        let (image, register, mut version) = small();
        compose_version_stage(&register, &image, &mut version, true).unwrap();
        assert_eq!((version.width, version.height), (Some(500), Some(250)));
    }

    #[test]
    fn version_stage_composes_missing_path() {
        let (image, register, _) = small();
        let mut version = Version {
            suffix: Some("-x".into()),
            format: Some("webp".into()),
            ..Version::default()
        };
        let stage = compose_version_stage(&register, &image, &mut version, true).unwrap();
        assert_eq!(version.path.as_deref(), Some("a-x.webp"));
        assert_eq!(stage.output(), Some(&Output::Final("a-x.webp".into())));
    }

    #[test]
    fn version_stage_rejects_bad_aspect() {
        let (image, register, mut version) = small();
        version.aspect = Some("4-3".into());
        let err = compose_version_stage(&register, &image, &mut version, true).unwrap_err();
        assert!(matches!(err, ResizeError::InvalidAspectSpec(_)));
        assert!(!err.is_execution_failure());
    }

    // =========================================================================
    // compose_pipeline tests
    // =========================================================================

    #[test]
    fn pipeline_returns_convert_command() {
        let mut output = two_version_descriptor();
        let pipeline = compose_pipeline(&landscape_source(), &mut output).unwrap();
        let expected = [
            // source image
            "convert ./assets/horizontal.jpg",
            "-auto-orient",
            "-strip",
            "-write mpr:./assets/horizontal.jpg +delete",
            // version[0]
            "mpr:./assets/horizontal.jpg",
            "-quality 80",
            "-resize \"1920x1920\"",
            "-write assets/horizontal-full.jpg +delete",
            // version[1]
            "mpr:./assets/horizontal.jpg",
            "-quality 80",
            "-crop \"3936x2623+624+0\"",
            "-resize \"1200x1200\"",
            "assets/horizontal-1200.jpg",
        ]
        .join(" ");
        assert_eq!(pipeline.to_string(), expected);
    }

    #[test]
    fn pipeline_sets_descriptor_path_on_each_version() {
        let mut output = two_version_descriptor();
        output.path = Some("/tmp".into());
        compose_pipeline(&landscape_source(), &mut output).unwrap();
        assert_eq!(output.versions[0].path.as_deref(), Some("/tmp/horizontal-full.jpg"));
        assert_eq!(output.versions[1].path.as_deref(), Some("/tmp/horizontal-1200.jpg"));
    }

    #[test]
    fn pipeline_sets_descriptor_prefix_on_each_version() {
        let mut output = two_version_descriptor();
        output.prefix = Some("im-".into());
        compose_pipeline(&landscape_source(), &mut output).unwrap();
        assert_eq!(
            output.versions[0].path.as_deref(),
            Some("assets/im-horizontal-full.jpg")
        );
        assert_eq!(
            output.versions[1].path.as_deref(),
            Some("assets/im-horizontal-1200.jpg")
        );
    }

    #[test]
    fn pipeline_local_prefix_wins() {
        let mut output = two_version_descriptor();
        output.prefix = Some("im-".into());
        output.versions[1].prefix = Some(String::new());
        compose_pipeline(&landscape_source(), &mut output).unwrap();
        assert_eq!(
            output.versions[0].path.as_deref(),
            Some("assets/im-horizontal-full.jpg")
        );
        assert_eq!(
            output.versions[1].path.as_deref(),
            Some("assets/horizontal-1200.jpg")
        );
    }

    #[test]
    fn pipeline_sets_default_quality() {
        let mut output = two_version_descriptor();
        compose_pipeline(&landscape_source(), &mut output).unwrap();
        assert_eq!(output.versions[0].quality, Some(80));
        assert_eq!(output.versions[1].quality, Some(80));
    }

    #[test]
    fn pipeline_sets_descriptor_quality() {
        let mut output = two_version_descriptor();
        output.quality = Some(20);
        compose_pipeline(&landscape_source(), &mut output).unwrap();
        assert_eq!(output.versions[0].quality, Some(20));
        assert_eq!(output.versions[1].quality, Some(20));
    }

    #[test]
    fn pipeline_preserves_local_quality() {
        let mut output = two_version_descriptor();
        output.quality = Some(30);
        output.versions[1].quality = Some(99);
        compose_pipeline(&landscape_source(), &mut output).unwrap();
        assert_eq!(output.versions[0].quality, Some(30));
        assert_eq!(output.versions[1].quality, Some(99));
    }

    #[test]
    fn pipeline_sets_dimensions() {
        let mut output = two_version_descriptor();
        compose_pipeline(&landscape_source(), &mut output).unwrap();
        // 5184x2623 into 1920 box → 1920 x 971.48
        assert_eq!(output.versions[0].width, Some(1920));
        assert_eq!(output.versions[0].height, Some(971));
        // 3936x2623 crop into 1200 box
        assert_eq!(output.versions[1].width, Some(1200));
        assert_eq!(output.versions[1].height, Some(800));
    }

    #[test]
    fn pipeline_leaves_versions_unset_before_composition() {
        let output = two_version_descriptor();
        assert!(output.versions.iter().all(|v| v.path.is_none()
            && v.width.is_none()
            && v.height.is_none()
            && v.quality.is_none()));
    }

    #[test]
    fn pipeline_with_ten_mixed_versions() {
        let mut output = mixed_descriptor();
        let pipeline = compose_pipeline(&landscape_source(), &mut output).unwrap();

        assert_eq!(pipeline.stages.len(), 11);
        assert_eq!(pipeline.version_stages().len(), 10);
        assert!(!pipeline.stages[0].is_terminal());

        let stages = pipeline.version_stages();
        for stage in &stages[..9] {
            assert!(!stage.is_terminal());
            assert!(stage.output().unwrap().releases_buffer());
        }
        assert!(stages[9].is_terminal());
        assert!(!stages[9].output().unwrap().releases_buffer());

        let unique: HashSet<&str> = paths(&output).into_iter().collect();
        assert_eq!(unique.len(), 10);
        assert_eq!(pipeline.output_paths().len(), 10);
    }

    #[test]
    fn pipeline_mixed_dimensions_match_expected() {
        let mut output = mixed_descriptor();
        compose_pipeline(&landscape_source(), &mut output).unwrap();
        assert_eq!(
            dimensions(&output),
            vec![
                (1920, 971),
                (1200, 800),
                (800, 533),
                (500, 333),
                (260, 173),
                (150, 100),
                (500, 333),
                (334, 500),
                (200, 200),
                (50, 50),
            ]
        );
    }

    #[test]
    fn pipeline_portrait_source_dimensions() {
        let mut output = mixed_descriptor();
        compose_pipeline(&portrait_source(), &mut output).unwrap();
        let v = &output.versions;
        assert_eq!((v[0].width, v[0].height), (Some(1440), Some(1920)));
        assert_eq!((v[3].width, v[3].height), (Some(333), Some(500)));
        assert_eq!((v[6].width, v[6].height), (Some(500), Some(333)));
        assert_eq!((v[7].width, v[7].height), (Some(333), Some(500)));
    }

    #[test]
    fn pipeline_transparent_versions_flatten_to_jpg() {
        let image = SourceImage::new("./assets/transparent.png", 800, 600);
        let mut output = mixed_descriptor();
        for version in &mut output.versions {
            version.flatten = Some(true);
            version.background = Some("red".into());
            version.format = Some("jpg".into());
        }
        let pipeline = compose_pipeline(&image, &mut output).unwrap();
        assert_eq!(
            output.versions[4].path.as_deref(),
            Some("assets/transparent-260.jpg")
        );
        // 800x534 crop → 260 x 173.55
        assert_eq!((output.versions[4].width, output.versions[4].height), (Some(260), Some(174)));
        assert!(
            pipeline.version_stages()[0]
                .to_string()
                .contains("-background red -flatten")
        );
    }

    #[test]
    fn pipeline_with_no_versions_is_preprocess_only() {
        let mut output = OutputDescriptor::default();
        let pipeline = compose_pipeline(&landscape_source(), &mut output).unwrap();
        assert_eq!(pipeline.stages.len(), 1);
    }

    #[test]
    fn pipeline_fails_fast_on_bad_aspect() {
        let mut output = two_version_descriptor();
        output.versions[1].aspect = Some("3/2".into());
        let err = compose_pipeline(&landscape_source(), &mut output).unwrap_err();
        assert!(matches!(err, ResizeError::InvalidAspectSpec(ref e) if e.spec == "3/2"));
    }

    #[test]
    fn pipeline_bad_aspect_leaves_descriptor_untouched() {
        let image = SourceImage::new("./a.jpg", 20, 10);
        let mut output = OutputDescriptor::new(vec![
            Version::bounded("-a", 10, 10),
            Version::bounded("-b", 10, 10).with_aspect("bad"),
        ]);
        output.quality = Some(70);
        let before = output.clone();

        let err = compose_pipeline(&image, &mut output).unwrap_err();
        assert!(matches!(err, ResizeError::InvalidAspectSpec(_)));
        assert_eq!(output, before);
        assert!(output.versions.iter().all(|v| v.path.is_none()
            && v.quality.is_none()
            && v.width.is_none()
            && v.height.is_none()));
    }

    // =========================================================================
    // resize_with tests
    // =========================================================================

    #[test]
    fn resize_executes_pipeline_once() {
        let executor = MockExecutor::new();
        let mut output = two_version_descriptor();
        let options = RunOptions {
            program: "magick".into(),
            timeout: Duration::from_secs(10),
        };

        let versions = resize_with(&executor, &landscape_source(), &mut output, &options).unwrap();
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[1].path.as_deref(), Some("assets/horizontal-1200.jpg"));

        let commands = executor.get_commands();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].0.starts_with("magick ./assets/horizontal.jpg -auto-orient"));
        assert_eq!(commands[0].1, Duration::from_secs(10));
    }

    #[test]
    fn resize_stderr_with_zero_exit_is_failure() {
        let executor =
            MockExecutor::with_outcomes(vec![MockOutcome::Stderr("convert: warning".into())]);
        let mut output = two_version_descriptor();
        let err = resize_with(&executor, &landscape_source(), &mut output, &RunOptions::default())
            .unwrap_err();
        assert!(
            matches!(err, ResizeError::PipelineExecutionFailed { ref diagnostic } if diagnostic == "convert: warning")
        );
        assert!(err.is_execution_failure());
        assert!(!err.is_timeout());
    }

    #[test]
    fn resize_nonzero_exit_without_stderr() {
        let executor = MockExecutor::with_outcomes(vec![MockOutcome::Exit(1)]);
        let mut output = two_version_descriptor();
        let err = resize_with(&executor, &landscape_source(), &mut output, &RunOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "pipeline execution failed: process exited with code 1"
        );
    }

    #[test]
    fn resize_timeout_is_distinguished() {
        let executor = MockExecutor::with_outcomes(vec![MockOutcome::Timeout]);
        let mut output = two_version_descriptor();
        let err = resize_with(&executor, &landscape_source(), &mut output, &RunOptions::default())
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(err.is_execution_failure());
        assert_eq!(err.to_string(), "pipeline timed out after 30000ms");
    }

    #[test]
    fn resize_bad_aspect_never_executes() {
        let executor = MockExecutor::new();
        let mut output = two_version_descriptor();
        output.versions[0].aspect = Some("x".into());
        let result = resize_with(&executor, &landscape_source(), &mut output, &RunOptions::default());
        assert!(matches!(result, Err(ResizeError::InvalidAspectSpec(_))));
        assert!(executor.get_commands().is_empty());
    }

    #[test]
    fn resize_without_versions_runs_nothing() {
        let executor = MockExecutor::new();
        let mut output = OutputDescriptor::default();
        let versions =
            resize_with(&executor, &landscape_source(), &mut output, &RunOptions::default()).unwrap();
        assert!(versions.is_empty());
        assert!(executor.get_commands().is_empty());
    }

    #[test]
    fn blank_stderr_with_zero_exit_has_readable_diagnostic() {
        let err: ResizeError = ExecutionError::Failed {
            code: Some(0),
            diagnostic: "\n".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "pipeline execution failed: process wrote blank output to stderr"
        );
    }

    #[test]
    fn spawn_error_becomes_execution_failure() {
        let err: ResizeError = ExecutionError::Spawn(std::io::Error::other("no shell")).into();
        assert!(matches!(err, ResizeError::PipelineExecutionFailed { ref diagnostic } if diagnostic == "no shell"));
    }

    // =========================================================================
    // identify tests
    // =========================================================================

    #[test]
    fn identify_reads_raw_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("tiny.png");
        image::RgbImage::new(6, 4).save(&path).unwrap();

        let source = identify(&path).unwrap();
        assert_eq!((source.width, source.height), (6, 4));
        assert!(source.path.ends_with("tiny.png"));
    }

    #[test]
    fn identify_missing_file_is_error() {
        let err = identify(Path::new("/definitely/not/here.jpg")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.jpg"));
    }
}
