//! redraw: approximate a raster image with randomly placed short strokes.
//!
//! Reads an image, runs the hill-climbing optimizer from `redraw-core`
//! for a fixed number of iterations, and writes the result as a PNG.
//! The random seed is taken from the wall clock and logged, so a run
//! can be replayed through the library API.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin redraw -- [OPTIONS] <IMAGE_PATH>
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`); `RUST_LOG=trace`
//! prints every stroke's vote.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use redraw_core::{Clock, Optimizer, RedrawConfig};
use redraw_export::PngMetadata;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Approximate an image by painting random short strokes.
///
/// Each iteration paints one stroke in a color taken from the source
/// image and keeps it only if more of its pixels moved closer to the
/// source than away from it.
#[derive(Parser)]
#[command(name = "redraw", version)]
struct Cli {
    /// Path to the input image (PNG, JPEG, BMP, WebP).
    image_path: PathBuf,

    /// Number of strokes to attempt.
    #[arg(short = 'n', long, default_value_t = RedrawConfig::DEFAULT_ITERATIONS)]
    iterations: u64,

    /// Maximum stroke side length in pixels.
    #[arg(
        short = 'r',
        long,
        default_value_t = RedrawConfig::DEFAULT_MAX_SEGMENT_SIZE,
        value_parser = clap::builder::RangedU64ValueParser::<u32>::new()
            .range(u64::from(RedrawConfig::MIN_MAX_SEGMENT_SIZE)..),
    )]
    max_segment_size: u32,

    /// Output PNG path.
    #[arg(short, long, default_value = "img.png")]
    output: PathBuf,

    /// Worker threads for pixel scoring (defaults to one per core).
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    threads: Option<usize>,

    /// Print run diagnostics as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,

    /// Full redraw config as a JSON string.
    ///
    /// When provided, `--iterations` and `--max-segment-size` are ignored.
    /// The JSON must be a valid `RedrawConfig` serialization; missing
    /// fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,
}

/// Build a [`RedrawConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual parameter flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<RedrawConfig> {
    if let Some(ref json) = cli.config_json {
        let config: RedrawConfig =
            serde_json::from_str(json).context("Error parsing --config-json")?;
        config.validate()?;
        return Ok(config);
    }

    Ok(RedrawConfig {
        iterations: cli.iterations,
        max_segment_size: cli.max_segment_size,
        ..RedrawConfig::default()
    })
}

/// Seed derived from the current Unix time in seconds.
fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Write `bytes` to `path` without ever leaving a partial file behind.
///
/// The data goes to a temporary file in the destination directory, which
/// is renamed over `path` once complete. On failure the temporary file is
/// removed when it is dropped.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Error creating temporary file in {}", dir.display()))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .with_context(|| format!("Error writing {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("Error writing {}", path.display()))?;
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = config_from_cli(cli)?;

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("redraw-{i}"))
            .build_global()
    {
        warn!("could not configure thread pool: {e}");
    }

    let image_bytes = std::fs::read(&cli.image_path)
        .with_context(|| format!("Error reading {}", cli.image_path.display()))?;
    info!(
        "Image: {} ({} bytes)",
        cli.image_path.display(),
        image_bytes.len(),
    );

    let source = redraw_core::decode::decode_rgba(&image_bytes)
        .with_context(|| format!("Error decoding {}", cli.image_path.display()))?;

    let seed = seed_from_clock();
    info!(
        seed,
        iterations = config.iterations,
        max_segment_size = config.max_segment_size,
        "starting"
    );

    let mut optimizer = Optimizer::new(source, &config, seed)?;
    let diagnostics = optimizer.run_with_diagnostics(&StdClock)?;

    if cli.json {
        let json =
            serde_json::to_string_pretty(&diagnostics).context("Error serializing diagnostics")?;
        println!("{json}");
    } else {
        println!("{}", diagnostics.report());
    }

    let title = cli
        .image_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("redraw");
    let description = format!(
        "seed={seed} iterations={} max_segment_size={}",
        config.iterations, config.max_segment_size,
    );
    let config_json = serde_json::to_string(&config).context("Error serializing config")?;
    let metadata = PngMetadata {
        title: Some(title),
        description: Some(&description),
        config_json: Some(&config_json),
    };
    let png = redraw_export::to_png(optimizer.canvas(), &metadata)?;

    write_atomically(&cli.output, &png)?;
    info!(
        "Output written to {} ({} bytes)",
        cli.output.display(),
        png.len(),
    );
    info!(
        "Time taken: {:.1}s",
        diagnostics.total_duration.as_secs_f64()
    );

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// Operator-facing message for a fatal error, including its cause chain.
///
/// Printed straight to stderr so it survives `RUST_LOG=off`.
fn failure_message(err: &anyhow::Error) -> String {
    format!("Error: {err:#}")
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("redraw").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_library_defaults() {
        let cli = parse(&["photo.jpg"]);
        assert_eq!(cli.output, PathBuf::from("img.png"));
        assert_eq!(config_from_cli(&cli).unwrap(), RedrawConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&["photo.jpg", "-n", "50", "-r", "7", "-o", "out.png"]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.iterations, 50);
        assert_eq!(config.max_segment_size, 7);
        assert_eq!(cli.output, PathBuf::from("out.png"));
    }

    #[test]
    fn segment_size_below_two_is_rejected() {
        let result = Cli::try_parse_from(["redraw", "photo.jpg", "-r", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_json_takes_precedence() {
        let cli = parse(&[
            "photo.jpg",
            "-n",
            "50",
            "--config-json",
            r#"{"iterations": 9, "max_segment_size": 4}"#,
        ]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.iterations, 9);
        assert_eq!(config.max_segment_size, 4);
    }

    #[test]
    fn invalid_config_json_is_rejected() {
        let cli = parse(&["photo.jpg", "--config-json", r#"{"max_segment_size": 1}"#]);
        assert!(config_from_cli(&cli).is_err());

        let cli = parse(&["photo.jpg", "--config-json", "not json"]);
        assert!(config_from_cli(&cli).is_err());
    }

    #[test]
    fn write_atomically_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        std::fs::write(&path, b"old").unwrap();

        write_atomically(&path, b"new contents").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"new contents");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "temporary file left behind");
    }

    #[test]
    fn write_atomically_into_missing_directory_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("img.png");

        assert!(write_atomically(&path, b"data").is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failure_message_includes_cause_chain() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&[dir.path().join("missing.png").to_str().unwrap()]);

        let err = run(&cli).unwrap_err();
        let message = failure_message(&err);

        assert!(message.starts_with("Error: Error reading "));
        assert!(message.contains("missing.png: "));
    }

    #[test]
    fn seed_is_current_unix_time() {
        let seed = seed_from_clock();
        // 2020-01-01T00:00:00Z
        assert!(seed > 1_577_836_800);
    }
}
