use clap::{Parser, Subcommand};
use image_versions::config::{self, Config};
use image_versions::imaging::{self, IdentifyError, ResizeError, ShellExecutor};
use image_versions::output;
use image_versions::types::{SourceImage, Version};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "image-versions")]
#[command(about = "Derive resized and cropped versions of images with one ImageMagick call each")]
#[command(long_about = "\
Derive resized and cropped versions of images with one ImageMagick call each

Every source image is decoded once, auto-oriented, stripped of metadata and
kept in memory; each configured version is then cropped to its aspect ratio,
resized to fit its bounding box and written next to the source (or into
--output-dir).

Versions come from resize.toml in the current directory, or --config:

  [[versions]]
  suffix = \"-500\"         # photo.jpg → photo-500.jpg
  max_width = 500
  max_height = 500
  aspect = \"3:2\"          # crop first; \"3:2!h\" / \"3:2!v\" force orientation

Requires ImageMagick (`convert`, or set execution.program = \"magick\").

Run 'image-versions gen-config' to generate a documented resize.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./resize.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory versions are written to (default: next to each source)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Prefix for every version file name
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Quality (1-100) for versions without their own
    #[arg(long, global = true)]
    quality: Option<u32>,

    /// Per-image pipeline timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log composed pipelines and timings (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize images into every configured version
    Resize {
        /// Source images
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Print the enriched versions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the ImageMagick command for an image without running it
    Plan {
        image: PathBuf,
        /// Source width; read from the file when omitted
        #[arg(long, requires = "height")]
        width: Option<u32>,
        /// Source height; read from the file when omitted
        #[arg(long, requires = "width")]
        height: Option<u32>,
    },
    /// Print a stock resize.toml with all options documented
    GenConfig,
}

type Outcome = Result<(SourceImage, Result<Vec<Version>, ResizeError>), IdentifyError>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = load_config(&cli)?;

    match &cli.command {
        Command::Resize { images, json } => {
            init_thread_pool(&config.processing);
            let executor = ShellExecutor::new();
            let options = config.execution.run_options();

            let outcomes: Vec<Outcome> = images
                .par_iter()
                .map(|path| -> Outcome {
                    let image = imaging::identify(path)?;
                    let mut descriptor = config.descriptor();
                    let result = imaging::resize_with(&executor, &image, &mut descriptor, &options)
                        .map(<[Version]>::to_vec);
                    Ok((image, result))
                })
                .collect();

            let failed = outcomes
                .iter()
                .filter(|o| !matches!(o, Ok((_, Ok(_)))))
                .count();

            if *json {
                println!("{}", serde_json::to_string_pretty(&outcomes_json(&outcomes))?);
            } else {
                for outcome in &outcomes {
                    match outcome {
                        Ok((image, result)) => output::print_resize_result(image, result),
                        Err(e) => println!("{e}"),
                    }
                    println!();
                }
                println!("{}", output::format_summary(outcomes.len() - failed, failed));
            }

            if failed > 0 {
                return Err(format!("{failed} of {} images failed", outcomes.len()).into());
            }
        }
        Command::Plan {
            image,
            width,
            height,
        } => {
            let source = match (width, height) {
                (Some(w), Some(h)) => SourceImage::new(image.to_string_lossy(), *w, *h),
                _ => imaging::identify(image)?,
            };
            let mut descriptor = config.descriptor();
            let pipeline = imaging::compose_pipeline(&source, &mut descriptor)?
                .with_program(&config.execution.program);
            output::print_plan(&source, &descriptor.versions, &pipeline);
        }
        Command::GenConfig => {}
    }

    Ok(())
}

/// Load the config file, then layer command-line overrides on top.
fn load_config(cli: &Cli) -> Result<Config, config::ConfigError> {
    let mut config = match &cli.config {
        Some(file) => config::load_config_file(file)?,
        None => config::load_config(Path::new("."))?,
    };

    if let Some(dir) = &cli.output_dir {
        config.output.path = Some(dir.to_string_lossy().into_owned());
    }
    if let Some(prefix) = &cli.prefix {
        config.output.prefix = Some(prefix.clone());
    }
    if let Some(quality) = cli.quality {
        config.output.quality = Some(quality);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.execution.timeout_ms = timeout_ms;
    }

    config.validate()?;
    debug!(versions = config.versions.len(), "configuration loaded");
    Ok(config)
}

fn outcomes_json(outcomes: &[Outcome]) -> serde_json::Value {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            Ok((image, Ok(versions))) => serde_json::json!({
                "source": image.path,
                "width": image.width,
                "height": image.height,
                "versions": versions,
            }),
            Ok((image, Err(e))) => serde_json::json!({
                "source": image.path,
                "width": image.width,
                "height": image.height,
                "error": e.to_string(),
            }),
            Err(e) => serde_json::json!({
                "source": e.path,
                "error": e.to_string(),
            }),
        })
        .collect()
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
