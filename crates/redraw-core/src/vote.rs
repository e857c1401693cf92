//! Majority-vote acceptance.
//!
//! A trial stroke is judged by how many of its pixels it improves, not
//! by how much: each pixel casts one vote for whichever canvas is closer
//! to the source, and the canvas with more votes wins. A stroke that
//! makes most of its pixels slightly worse and a few much better is
//! rejected. Summed error would accept it, which is a different
//! optimizer.

use crate::canvas::Canvas;
use crate::score::{ScorePair, Vote};
use crate::types::RedrawError;

/// Per-stroke vote counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Pixels where the accepted canvas is at least as close.
    pub current: usize,
    /// Pixels where the trial canvas is strictly closer.
    pub trial: usize,
}

/// Outcome of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Copy the trial canvas over the accepted one.
    Keep,
    /// Copy the accepted canvas over the trial one.
    Discard,
}

impl Tally {
    /// Count the votes of `scores`.
    #[must_use]
    pub fn from_scores(scores: &[ScorePair]) -> Self {
        let mut tally = Self::default();
        for pair in scores {
            tally.record(pair.vote());
        }
        tally
    }

    /// Add one pixel's vote.
    pub const fn record(&mut self, vote: Vote) {
        match vote {
            Vote::Current => self.current += 1,
            Vote::Trial => self.trial += 1,
        }
    }

    /// Total votes cast.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.current + self.trial
    }

    /// The edit is discarded only when the current canvas strictly leads;
    /// a tied vote keeps it.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        if self.current > self.trial {
            Verdict::Discard
        } else {
            Verdict::Keep
        }
    }
}

/// Apply `verdict`, leaving `current` and `trial` pixel-identical.
///
/// # Errors
///
/// Returns [`RedrawError::DimensionMismatch`] if the canvases differ in
/// size.
pub fn apply(
    verdict: Verdict,
    current: &mut Canvas,
    trial: &mut Canvas,
) -> Result<(), RedrawError> {
    match verdict {
        Verdict::Keep => current.copy_from(trial),
        Verdict::Discard => trial.copy_from(current),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::score::evaluate;
    use crate::types::{Color, Dimensions, Point};

    const DIMS: Dimensions = Dimensions {
        width: 5,
        height: 1,
    };
    const TARGET: Color = Color::new(200, 100, 50, 255);
    const NEAR: Color = Color::new(190, 100, 50, 255);
    const FAR: Color = Color::new(0, 0, 0, 255);

    fn pair(current: u32, trial: u32) -> ScorePair {
        ScorePair {
            point: Point::new(0, 0),
            current,
            trial,
        }
    }

    fn row() -> Vec<Point> {
        (0..5).map(|x| Point::new(x, 0)).collect()
    }

    #[test]
    fn counts_strict_wins_and_ties() {
        let tally = Tally::from_scores(&[pair(5, 1), pair(1, 5), pair(3, 3), pair(9, 0)]);
        assert_eq!(
            tally,
            Tally {
                current: 2,
                trial: 2
            }
        );
        assert_eq!(tally.total(), 4);
    }

    #[test]
    fn current_majority_discards() {
        let tally = Tally {
            current: 3,
            trial: 2,
        };
        assert_eq!(tally.verdict(), Verdict::Discard);
    }

    #[test]
    fn tied_vote_keeps() {
        let tally = Tally {
            current: 2,
            trial: 2,
        };
        assert_eq!(tally.verdict(), Verdict::Keep);
        assert_eq!(Tally::default().verdict(), Verdict::Keep);
    }

    #[test]
    fn majority_of_count_beats_magnitude() {
        // Trial is slightly worse on three pixels and vastly better on two.
        let scores = [
            pair(0, 1),
            pair(0, 1),
            pair(0, 1),
            pair(200_000, 0),
            pair(200_000, 0),
        ];
        let tally = Tally::from_scores(&scores);
        assert_eq!(tally.verdict(), Verdict::Discard);
    }

    #[test]
    fn all_pixels_favoring_trial_keep_the_edit() {
        let source = Canvas::new(DIMS, TARGET);
        let mut current = Canvas::new(DIMS, FAR);
        let mut trial = current.clone();
        trial.paint(&row(), NEAR);

        let tally = Tally::from_scores(&evaluate(&row(), &source, &current, &trial));
        assert_eq!(tally.trial, 5);
        apply(tally.verdict(), &mut current, &mut trial).unwrap();

        assert_eq!(current, trial);
        assert_eq!(current.get(Point::new(0, 0)), Some(NEAR));
    }

    #[test]
    fn all_pixels_favoring_current_discard_the_edit() {
        let source = Canvas::new(DIMS, TARGET);
        let mut current = Canvas::new(DIMS, NEAR);
        let mut trial = current.clone();
        trial.paint(&row(), FAR);

        let tally = Tally::from_scores(&evaluate(&row(), &source, &current, &trial));
        assert_eq!(tally.current, 5);
        apply(tally.verdict(), &mut current, &mut trial).unwrap();

        assert_eq!(current, trial);
        assert_eq!(trial.get(Point::new(4, 0)), Some(NEAR));
    }

    #[test]
    fn repeating_acceptance_without_edit_is_noop() {
        let source = Canvas::new(DIMS, TARGET);
        let mut current = Canvas::new(DIMS, FAR);
        let mut trial = current.clone();
        trial.paint(&row()[..3], NEAR);

        let tally = Tally::from_scores(&evaluate(&row(), &source, &current, &trial));
        apply(tally.verdict(), &mut current, &mut trial).unwrap();
        let settled = current.clone();

        let again = Tally::from_scores(&evaluate(&row(), &source, &current, &trial));
        assert_eq!(again.trial, 0);
        apply(again.verdict(), &mut current, &mut trial).unwrap();
        assert_eq!(current, settled);
        assert_eq!(trial, settled);
    }
}
