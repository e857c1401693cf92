//! Per-pixel difference scoring.
//!
//! Every pixel of a stroke is scored independently: its current color
//! and its trial color are each compared against the source. No pixel's
//! score depends on any other, so the pixels fan out across the rayon
//! pool and the results are collected back in path order. Each result
//! also carries the point it was computed for.

use rayon::prelude::*;

use crate::canvas::Canvas;
use crate::types::Point;

/// Difference scores of one pixel, before and after the trial edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorePair {
    /// Pixel the scores belong to.
    pub point: Point,
    /// Score of the accepted canvas against the source.
    pub current: u32,
    /// Score of the trial canvas against the source.
    pub trial: u32,
}

/// Which canvas a single pixel votes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    /// The accepted canvas is at least as close to the source.
    Current,
    /// The trial canvas is strictly closer to the source.
    Trial,
}

impl ScorePair {
    /// Lower score wins; ties go to the current canvas.
    #[must_use]
    pub const fn vote(&self) -> Vote {
        if self.trial < self.current {
            Vote::Trial
        } else {
            Vote::Current
        }
    }
}

/// Score a single pixel.
///
/// Returns `None` if `point` lies outside any of the three buffers.
#[must_use]
pub fn score_pixel(
    point: Point,
    source: &Canvas,
    current: &Canvas,
    trial: &Canvas,
) -> Option<ScorePair> {
    let target = source.get(point)?;
    Some(ScorePair {
        point,
        current: current.get(point)?.difference(target),
        trial: trial.get(point)?.difference(target),
    })
}

/// Score every pixel of `path` concurrently.
///
/// The returned pairs are in the same order as `path`, each tagged with
/// its originating point. Points outside the canvases are skipped, so
/// callers that need one pair per point must clip `path` first.
///
/// The canvases are only borrowed; nothing may write to them until this
/// returns.
#[must_use]
pub fn evaluate(
    path: &[Point],
    source: &Canvas,
    current: &Canvas,
    trial: &Canvas,
) -> Vec<ScorePair> {
    debug_assert_eq!(source.dimensions(), current.dimensions());
    debug_assert_eq!(source.dimensions(), trial.dimensions());

    path.par_iter()
        .filter_map(|&point| score_pixel(point, source, current, trial))
        .collect()
}
