//! Local refinement of a constructed sequence
//!
//! Adjacent-swap hill climbing. The opening slot is never touched. A swap of
//! positions `i` and `i + 1` only changes the (up to three) transitions
//! between positions `i - 1 .. i + 2`, so each candidate swap is judged on
//! that local sum alone and kept only if it strictly improves it.

use super::scorer::TransitionScorer;
use super::track::Track;
use crate::config::RefinementStrategy;

/// A refinement step over an ordering of track indices
pub trait SequenceRefiner {
    /// Improve `order` in place, returning the number of swaps kept
    fn refine(&self, order: &mut [usize], tracks: &[Track], scorer: &TransitionScorer<'_>) -> usize;
}

/// Sum of transition scores on the edges touching positions `i` and `i + 1`
fn local_flow(order: &[usize], tracks: &[Track], scorer: &TransitionScorer<'_>, i: usize) -> f32 {
    let first = i.saturating_sub(1);
    let last = (i + 2).min(order.len() - 1);
    (first..last)
        .map(|j| scorer.score(&tracks[order[j]], &tracks[order[j + 1]]))
        .sum()
}

/// One forward sweep of adjacent swaps
///
/// Bounded cost (one pass, O(n) score evaluations), not guaranteed to reach
/// a local optimum: a swap made late in the sweep can open up an earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacentSwapSweep;

impl SequenceRefiner for AdjacentSwapSweep {
    fn refine(&self, order: &mut [usize], tracks: &[Track], scorer: &TransitionScorer<'_>) -> usize {
        let mut swaps = 0;
        for i in 1..order.len().saturating_sub(1) {
            let before = local_flow(order, tracks, scorer, i);
            order.swap(i, i + 1);
            let after = local_flow(order, tracks, scorer, i);
            if after > before {
                swaps += 1;
                log::debug!(
                    "Swapped positions {} and {} (+{:.1})",
                    i + 1,
                    i + 2,
                    after - before
                );
            } else {
                order.swap(i, i + 1);
            }
        }
        swaps
    }
}

/// Repeated sweeps until a sweep makes no swap, or `max_passes` is reached
#[derive(Debug, Clone, Copy)]
pub struct SwapUntilStable {
    /// Upper bound on sweeps
    pub max_passes: usize,
}

impl SequenceRefiner for SwapUntilStable {
    fn refine(&self, order: &mut [usize], tracks: &[Track], scorer: &TransitionScorer<'_>) -> usize {
        let mut total = 0;
        for pass in 0..self.max_passes {
            let swaps = AdjacentSwapSweep.refine(order, tracks, scorer);
            total += swaps;
            if swaps == 0 {
                log::debug!("Stable after {} passes", pass + 1);
                break;
            }
        }
        total
    }
}

/// Refiner for a configured strategy
pub fn refiner_for(strategy: RefinementStrategy) -> Box<dyn SequenceRefiner + Send + Sync> {
    match strategy {
        RefinementStrategy::SingleSweep => Box::new(AdjacentSwapSweep),
        RefinementStrategy::UntilStable { max_passes } => Box::new(SwapUntilStable { max_passes }),
    }
}
