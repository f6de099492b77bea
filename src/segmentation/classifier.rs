//! Heuristic phase labelling
//!
//! Labels a bounded segment from its aggregate descriptors and its position
//! in the track. Rules are checked in order and the first match wins:
//!
//! 1. Quiet and sparse: intro, outro or breakdown depending on position
//! 2. Loud and busy: build-up early, climax late
//! 3. Busy alone: rhythmic
//! 4. Bright: melodic
//! 5. Position only: introduction, development or conclusion

use super::frame_series::PhaseDescriptors;
use crate::analysis::result::PhaseType;
use crate::config::PhaseThresholds;

/// Rule-based phase labeller
#[derive(Debug, Clone, Default)]
pub struct PhaseClassifier {
    thresholds: PhaseThresholds,
}

impl PhaseClassifier {
    /// Create a classifier with the given thresholds
    pub fn new(thresholds: PhaseThresholds) -> Self {
        Self { thresholds }
    }

    /// Normalized position of a 0-based phase index among `total` phases
    ///
    /// A lone phase sits at position 0.
    pub fn normalized_position(index: usize, total: usize) -> f32 {
        index as f32 / total.saturating_sub(1).max(1) as f32
    }

    /// Label one phase
    ///
    /// # Arguments
    ///
    /// * `descriptors` - Aggregate descriptors of the phase
    /// * `index` - 0-based position of the phase in the track
    /// * `total` - Number of phases in the track
    pub fn classify(&self, descriptors: &PhaseDescriptors, index: usize, total: usize) -> PhaseType {
        let t = &self.thresholds;
        let position = Self::normalized_position(index, total);

        let quiet = descriptors.energy < t.low_energy;
        let loud = descriptors.energy > t.high_energy;
        let sparse = descriptors.onset_density < t.low_onset_density;
        let busy = descriptors.onset_density > t.high_onset_density;

        if quiet && sparse {
            if position <= t.intro_position {
                PhaseType::IntroAmbient
            } else if position >= t.outro_position {
                PhaseType::OutroFade
            } else {
                PhaseType::BreakdownQuiet
            }
        } else if loud && busy {
            if position >= t.climax_position {
                PhaseType::ClimaxPeak
            } else {
                PhaseType::BuildUpEnergetic
            }
        } else if busy {
            PhaseType::RhythmicPercussive
        } else if descriptors.brightness > t.high_brightness {
            PhaseType::BrightMelodic
        } else if position < t.early_position {
            PhaseType::Introduction
        } else if position > t.late_position {
            PhaseType::Conclusion
        } else {
            PhaseType::Development
        }
    }
}
