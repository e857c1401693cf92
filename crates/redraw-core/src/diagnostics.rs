//! Run diagnostics: counts and timing for a complete optimization run.
//!
//! Timing goes through the [`Clock`] trait so the engine never reads a
//! system clock itself. The CLI supplies a `std::time::Instant`-backed
//! clock; tests can supply a fake one.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{Dimensions, RedrawConfig};

/// Source of timestamps for diagnostics.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Iteration counters accumulated by the optimizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Iterations completed.
    pub iterations: u64,
    /// Strokes kept by the vote.
    pub kept: u64,
    /// Strokes rejected by the vote.
    pub discarded: u64,
    /// Strokes that fell entirely outside the canvas.
    pub clipped: u64,
    /// Pixels painted onto the trial canvas (after clipping).
    pub painted_pixels: u64,
    /// Rasterized pixels dropped because they fell outside the canvas.
    pub clipped_pixels: u64,
}

impl RunSummary {
    /// Fraction of completed iterations whose stroke was kept.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.kept as f64 / self.iterations as f64
        }
    }
}

/// Diagnostics for a complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDiagnostics {
    /// Seed the run was started with.
    pub seed: u64,
    /// Canvas size.
    pub dimensions: Dimensions,
    /// Number of distinct source colors.
    pub palette_size: usize,
    /// Configuration the run used.
    pub config: RedrawConfig,
    /// Iteration counters.
    pub summary: RunSummary,
    /// Wall-clock duration of the optimization loop (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
}

impl RunDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let s = &self.summary;
        let mut lines = Vec::new();

        lines.push(format!("Redraw Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Image: {} ({} pixels), palette: {} colors",
            self.dimensions,
            self.dimensions.pixel_count(),
            self.palette_size,
        ));
        lines.push(format!(
            "Seed: {}  |  Max segment size: {}",
            self.seed, self.config.max_segment_size,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms ({:.1}s)",
            duration_ms(self.total_duration),
            self.total_duration.as_secs_f64(),
        ));
        lines.push(String::new());
        lines.push(format!(
            "Iterations: {} of {}",
            s.iterations, self.config.iterations
        ));
        lines.push(format!(
            "Kept: {}  |  Discarded: {}  |  Off-canvas: {}  |  Acceptance: {:.1}%",
            s.kept,
            s.discarded,
            s.clipped,
            s.acceptance_rate() * 100.0,
        ));
        lines.push(format!(
            "Pixels painted: {}  |  Pixels clipped: {}",
            s.painted_pixels, s.clipped_pixels,
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
