//! End-to-end flow sequencing
//!
//! Greedy construction, then refinement, then per-position reasoning.
//! Runs single-threaded: every construction step depends on the previous
//! pick. Separate collections can be sequenced in parallel.

use serde::{Deserialize, Serialize};

use super::builder::SequenceBuilder;
use super::compatibility::CompatibilityModel;
use super::explainer::explain;
use super::optimizer::{refiner_for, SequenceRefiner};
use super::scorer::TransitionScorer;
use super::track::Track;
use crate::config::SequencingConfig;

/// One slot of a recommended sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceEntry {
    /// 1-based position
    pub position: usize,
    /// Track placed here
    pub track: Track,
    /// Why it sits here
    pub reasoning: String,
    /// Score of the transition from the previous entry (`None` for the opener)
    pub transition_score: Option<f32>,
}

/// Builds listening orders for track collections
pub struct FlowSequencer<'a> {
    scorer: TransitionScorer<'a>,
    refiner: Box<dyn SequenceRefiner + Send + Sync>,
}

impl Default for FlowSequencer<'static> {
    fn default() -> Self {
        Self::new(SequencingConfig::default())
    }
}

impl FlowSequencer<'static> {
    /// Sequencer over the shared compatibility tables
    pub fn new(config: SequencingConfig) -> Self {
        Self::with_model(CompatibilityModel::global(), config)
    }
}

impl<'a> FlowSequencer<'a> {
    /// Sequencer over a custom compatibility model
    pub fn with_model(model: &'a CompatibilityModel, config: SequencingConfig) -> Self {
        Self {
            scorer: TransitionScorer::new(model),
            refiner: refiner_for(config.refinement),
        }
    }

    /// Replace the refinement step
    pub fn with_refiner(mut self, refiner: Box<dyn SequenceRefiner + Send + Sync>) -> Self {
        self.refiner = refiner;
        self
    }

    /// Scorer in use
    pub fn scorer(&self) -> &TransitionScorer<'a> {
        &self.scorer
    }

    /// Ordering as indices into `tracks`
    ///
    /// Unusable descriptor values are replaced by neutral defaults first
    /// (see [`Track::resolved`]).
    pub fn order(&self, tracks: &[Track]) -> Vec<usize> {
        self.order_resolved(&resolve_all(tracks))
    }

    fn order_resolved(&self, tracks: &[Track]) -> Vec<usize> {
        let mut order = SequenceBuilder::new(self.scorer).build(tracks);
        let swaps = self.refiner.refine(&mut order, tracks, &self.scorer);
        log::debug!(
            "Sequenced {} tracks, {} swaps, flow {:.1}",
            tracks.len(),
            swaps,
            self.flow_score(&order, tracks)
        );
        order
    }

    /// Sum of transition scores along an ordering
    pub fn flow_score(&self, order: &[usize], tracks: &[Track]) -> f32 {
        order
            .windows(2)
            .map(|w| self.scorer.score(&tracks[w[0]], &tracks[w[1]]))
            .sum()
    }

    /// Recommend a listening order with reasoning
    ///
    /// The result is a permutation of `tracks`, each entry carrying the
    /// resolved track. An empty collection gives an empty sequence.
    pub fn recommend(&self, tracks: &[Track]) -> Vec<SequenceEntry> {
        let tracks = resolve_all(tracks);
        let tracks = tracks.as_slice();
        let order = self.order_resolved(tracks);
        let total = order.len();

        order
            .iter()
            .enumerate()
            .map(|(slot, &idx)| {
                let track = &tracks[idx];
                let transition_score = slot
                    .checked_sub(1)
                    .map(|prev| self.scorer.score(&tracks[order[prev]], track));
                SequenceEntry {
                    position: slot + 1,
                    reasoning: explain(track, slot + 1, total),
                    track: track.clone(),
                    transition_score,
                }
            })
            .collect()
    }
}

fn resolve_all(tracks: &[Track]) -> Vec<Track> {
    tracks.iter().map(Track::resolved).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefinementStrategy;
    use crate::sequencing::optimizer::AdjacentSwapSweep;

    fn collection() -> Vec<Track> {
        vec![
            Track { energy: 0.06, mood: "driving".into(), tempo: 122.0, key: "G".into(), ..Track::neutral("b") },
            Track { energy: 0.01, mood: "atmospheric".into(), tempo: 70.0, key: "C".into(), ..Track::neutral("a") },
            Track { energy: 0.03, mood: "warm".into(), tempo: 95.0, key: "Am".into(), ..Track::neutral("c") },
            Track { energy: 0.11, mood: "energetic".into(), tempo: 130.0, key: "D".into(), ..Track::neutral("d") },
        ]
    }

    #[test]
    fn test_empty_collection() {
        assert!(FlowSequencer::default().recommend(&[]).is_empty());
    }

    #[test]
    fn test_entries_are_numbered_and_scored() {
        let entries = FlowSequencer::default().recommend(&collection());
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].track.filename, "a");
        assert!(entries[0].transition_score.is_none());
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.position, i + 1);
            assert!(!e.reasoning.is_empty());
            if i > 0 {
                assert!(e.transition_score.unwrap() >= 0.0);
            }
        }
    }

    #[test]
    fn test_strategies_share_opening() {
        let tracks = collection();
        let single = FlowSequencer::default().order(&tracks);
        let stable = FlowSequencer::new(SequencingConfig {
            refinement: RefinementStrategy::UntilStable { max_passes: 20 },
        })
        .order(&tracks);
        assert_eq!(single[0], stable[0]);
        let seq = FlowSequencer::default();
        assert!(seq.flow_score(&stable, &tracks) >= seq.flow_score(&single, &tracks) - 1e-3);
    }

    #[test]
    fn test_unusable_values_are_defaulted_before_sequencing() {
        let tracks = vec![
            Track { energy: f32::NAN, mood: "aggressive".into(), tempo: 170.0, ..Track::neutral("nan") },
            Track { energy: 0.01, mood: "atmospheric".into(), tempo: 70.0, ..Track::neutral("haze") },
        ];
        let entries = FlowSequencer::default().recommend(&tracks);
        let names: Vec<&str> = entries.iter().map(|e| e.track.filename.as_str()).collect();
        assert_eq!(names, vec!["haze", "nan"]);
        assert_eq!(entries[1].track.energy, crate::sequencing::track::DEFAULT_ENERGY);
        assert!(entries[1].transition_score.unwrap().is_finite());
    }

    #[test]
    fn test_custom_refiner_and_model() {
        let model = CompatibilityModel::new().with_mood_relation("driving", "atmospheric");
        let seq = FlowSequencer::with_model(&model, SequencingConfig::default())
            .with_refiner(Box::new(AdjacentSwapSweep));
        let entries = seq.recommend(&collection());
        assert_eq!(entries.len(), 4);
    }
}
