//! The hill-climbing loop.
//!
//! One iteration moves through `Idle -> Painting -> Scoring -> Accepting
//! -> Idle`:
//!
//! 1. draw a candidate stroke and clip its path to the canvas,
//! 2. paint it onto the trial canvas,
//! 3. score every painted pixel of both canvases against the source,
//! 4. vote, then copy the winning canvas over the losing one.
//!
//! Iterations are strictly sequential: the next stroke is only drawn once
//! both canvases are identical again. After the configured number of
//! iterations the optimizer is `Done` and [`Optimizer::canvas`] holds the
//! result.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::{debug, debug_span, info, trace};

use crate::candidate::CandidateGenerator;
use crate::canvas::Canvas;
use crate::diagnostics::{Clock, RunDiagnostics, RunSummary};
use crate::palette::Palette;
use crate::score::evaluate;
use crate::types::{Point, RedrawConfig, RedrawError, RgbaImage};
use crate::vote::{Tally, Verdict, apply};

/// Number of progress lines logged over a full run.
const PROGRESS_STEPS: u64 = 10;

/// Where the optimizer is within an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between iterations; both canvases are identical.
    Idle,
    /// A stroke is being painted onto the trial canvas.
    Painting,
    /// Path pixels are being scored.
    Scoring,
    /// The vote is being applied.
    Accepting,
    /// All iterations have completed.
    Done,
}

/// Result of a single iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The stroke won the vote and is now part of the canvas.
    Kept,
    /// The stroke lost the vote and was rolled back.
    Discarded,
    /// No pixel of the stroke fell inside the canvas.
    Clipped,
}

/// Owns the source, palette and both canvases for one run.
#[derive(Debug)]
pub struct Optimizer {
    source: Canvas,
    palette: Palette,
    current: Canvas,
    trial: Canvas,
    generator: CandidateGenerator,
    rng: Pcg32,
    config: RedrawConfig,
    seed: u64,
    phase: Phase,
    summary: RunSummary,
    /// Reused across iterations to hold the clipped stroke.
    path: Vec<Point>,
}

impl Optimizer {
    /// Prepare a run over `source`.
    ///
    /// Extracts the palette and allocates both canvases filled with
    /// `config.background`.
    ///
    /// # Errors
    ///
    /// Returns [`RedrawError::InvalidConfig`] if `config` fails
    /// validation and [`RedrawError::EmptyImage`] if `source` has no
    /// pixels.
    pub fn new(source: RgbaImage, config: &RedrawConfig, seed: u64) -> Result<Self, RedrawError> {
        config.validate()?;
        let palette = Palette::from_image(&source)?;
        let source = Canvas::from_image(source);
        let dimensions = source.dimensions();
        let generator = CandidateGenerator::new(dimensions, config.max_segment_size)?;
        let current = Canvas::new(dimensions, config.background);
        let trial = current.clone();
        // A clipped stroke holds at most one pixel per canvas column.
        let path_capacity = config.max_segment_size.min(dimensions.width);

        debug!(
            %dimensions,
            palette_size = palette.len(),
            seed,
            "optimizer ready"
        );

        Ok(Self {
            source,
            palette,
            current,
            trial,
            generator,
            rng: Pcg32::seed_from_u64(seed),
            config: config.clone(),
            seed,
            phase: if config.iterations == 0 {
                Phase::Done
            } else {
                Phase::Idle
            },
            summary: RunSummary::default(),
            path: Vec::with_capacity(usize::try_from(path_capacity).unwrap_or(0)),
        })
    }

    /// Run one iteration.
    ///
    /// Returns `Ok(None)` once all configured iterations have completed.
    ///
    /// # Errors
    ///
    /// Propagates [`RedrawError::DegenerateSegment`] from candidate
    /// generation and [`RedrawError::DimensionMismatch`] from the canvas
    /// copy. Neither can occur for an optimizer built by [`Self::new`].
    pub fn step(&mut self) -> Result<Option<StepOutcome>, RedrawError> {
        if self.phase == Phase::Done {
            return Ok(None);
        }

        self.phase = Phase::Painting;
        let candidate = self.generator.generate(&mut self.rng, &self.palette)?;

        // Paths are monotone in x and y, so the in-canvas pixels form one
        // contiguous run. Stopping at its end keeps the walk bounded by the
        // canvas size rather than the segment length.
        self.path.clear();
        self.path.extend(
            candidate
                .segment
                .points()
                .skip_while(|&p| !self.trial.contains(p))
                .take_while(|&p| self.trial.contains(p)),
        );
        let dropped = candidate.segment.len() - self.path.len();
        self.summary.clipped_pixels += dropped as u64;

        // Every generated stroke is anchored inside the canvas, so this
        // branch is only reachable if candidate generation changes.
        let outcome = if self.path.is_empty() {
            StepOutcome::Clipped
        } else {
            self.trial.paint(&self.path, candidate.color);
            self.summary.painted_pixels += self.path.len() as u64;

            self.phase = Phase::Scoring;
            let scores = evaluate(&self.path, &self.source, &self.current, &self.trial);
            let tally = Tally::from_scores(&scores);

            self.phase = Phase::Accepting;
            let verdict = tally.verdict();
            apply(verdict, &mut self.current, &mut self.trial)?;

            trace!(
                iteration = self.summary.iterations,
                current_votes = tally.current,
                trial_votes = tally.trial,
                ?verdict,
                "stroke judged"
            );

            match verdict {
                Verdict::Keep => StepOutcome::Kept,
                Verdict::Discard => StepOutcome::Discarded,
            }
        };

        match outcome {
            StepOutcome::Kept => self.summary.kept += 1,
            StepOutcome::Discarded => self.summary.discarded += 1,
            StepOutcome::Clipped => self.summary.clipped += 1,
        }
        self.summary.iterations += 1;
        self.phase = if self.summary.iterations >= self.config.iterations {
            Phase::Done
        } else {
            Phase::Idle
        };

        Ok(Some(outcome))
    }

    /// Run all remaining iterations.
    ///
    /// # Errors
    ///
    /// See [`Self::step`].
    pub fn run(&mut self) -> Result<RunSummary, RedrawError> {
        let span = debug_span!(
            "redraw",
            seed = self.seed,
            iterations = self.config.iterations
        );
        let _guard = span.enter();

        let progress_every = (self.config.iterations / PROGRESS_STEPS).max(1);
        while self.step()?.is_some() {
            let done = self.summary.iterations;
            if done % progress_every == 0 {
                info!(
                    iterations = done,
                    total = self.config.iterations,
                    kept = self.summary.kept,
                    "progress"
                );
            }
        }

        Ok(self.summary)
    }

    /// Run all remaining iterations and report counts and timing.
    ///
    /// # Errors
    ///
    /// See [`Self::step`].
    pub fn run_with_diagnostics<C: Clock>(
        &mut self,
        clock: &C,
    ) -> Result<RunDiagnostics, RedrawError> {
        let start = clock.now();
        let summary = self.run()?;
        let total_duration = clock.elapsed(&start);

        Ok(RunDiagnostics {
            seed: self.seed,
            dimensions: self.source.dimensions(),
            palette_size: self.palette.len(),
            config: self.config.clone(),
            summary,
            total_duration,
        })
    }

    /// Current position in the iteration state machine.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Counters so far.
    #[must_use]
    pub const fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Seed the random stream was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Colors strokes are drawn from.
    #[must_use]
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The source image being approximated.
    #[must_use]
    pub const fn source(&self) -> &Canvas {
        &self.source
    }

    /// The accepted canvas.
    #[must_use]
    pub const fn canvas(&self) -> &Canvas {
        &self.current
    }

    /// Consume the optimizer and return the accepted canvas.
    #[must_use]
    pub fn into_canvas(self) -> Canvas {
        self.current
    }
}
