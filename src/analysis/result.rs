//! Segmentation result types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::segmentation::frame_series::PhaseDescriptors;

/// Musical role of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseType {
    /// Quiet, sparse opening material
    IntroAmbient,
    /// Loud and busy, still rising
    BuildUpEnergetic,
    /// Dense onsets without the energy of a build-up
    RhythmicPercussive,
    /// Spectrally bright, melodic material
    BrightMelodic,
    /// Loud and busy, late in the track
    ClimaxPeak,
    /// Quiet, sparse material in the middle of a track
    BreakdownQuiet,
    /// Unremarkable material in the middle of a track
    Development,
    /// Unremarkable material near the start
    Introduction,
    /// Unremarkable material near the end
    Conclusion,
    /// Quiet, sparse closing material
    OutroFade,
}

impl PhaseType {
    /// Display label (e.g. "Intro/Ambient", "Climax/Peak")
    pub fn label(&self) -> &'static str {
        match self {
            PhaseType::IntroAmbient => "Intro/Ambient",
            PhaseType::BuildUpEnergetic => "Build-up/Energetic",
            PhaseType::RhythmicPercussive => "Rhythmic/Percussive",
            PhaseType::BrightMelodic => "Bright/Melodic",
            PhaseType::ClimaxPeak => "Climax/Peak",
            PhaseType::BreakdownQuiet => "Breakdown/Quiet",
            PhaseType::Development => "Development",
            PhaseType::Introduction => "Introduction",
            PhaseType::Conclusion => "Conclusion",
            PhaseType::OutroFade => "Outro/Fade",
        }
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A contiguous, labelled interval of a track
///
/// Phases of one track are contiguous and non-overlapping: the first starts
/// at 0, each starts where the previous ended, the last ends at the track
/// duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// 1-based position within the track
    pub index: usize,

    /// Start time in seconds
    pub start_time: f32,

    /// End time in seconds
    pub end_time: f32,

    /// `end_time - start_time`, in seconds
    pub duration: f32,

    /// Assigned label
    #[serde(rename = "type")]
    pub phase_type: PhaseType,

    /// Mean RMS energy
    pub avg_energy: f32,

    /// Mean spectral centroid, in Hz
    pub avg_brightness: f32,

    /// Mean zero-crossing rate
    pub avg_roughness: f32,

    /// Mean spectral rolloff, in Hz
    pub avg_rolloff: f32,

    /// Onsets per second
    pub onset_density: f32,
}

impl Phase {
    /// Aggregate descriptors of this phase
    pub fn descriptors(&self) -> PhaseDescriptors {
        PhaseDescriptors {
            energy: self.avg_energy,
            brightness: self.avg_brightness,
            roughness: self.avg_roughness,
            rolloff: self.avg_rolloff,
            onset_density: self.onset_density,
        }
    }
}

/// Phases of one track from a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPhases {
    /// Position of the track in the batch input
    pub index: usize,
    /// Track filename
    pub filename: String,
    /// Detected phases
    pub phases: Vec<Phase>,
}

/// A track whose segmentation failed in a batch run
#[derive(Debug, Clone)]
pub struct SegmentationFailure {
    /// Position of the track in the batch input
    pub index: usize,
    /// Track filename
    pub filename: String,
    /// Why it failed
    pub error: crate::error::AnalysisError,
}

/// Outcome of segmenting a collection of tracks
///
/// Both lists follow the original input order regardless of which worker
/// finished first.
#[derive(Debug, Clone, Default)]
pub struct BatchSegmentation {
    /// Successfully segmented tracks
    pub tracks: Vec<TrackPhases>,
    /// Tracks that could not be segmented
    pub failures: Vec<SegmentationFailure>,
}

impl BatchSegmentation {
    /// Phases for the track at `index` in the batch input, if it succeeded
    pub fn phases_for(&self, index: usize) -> Option<&[Phase]> {
        self.tracks
            .binary_search_by_key(&index, |t| t.index)
            .ok()
            .map(|pos| self.tracks[pos].phases.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_type_labels() {
        assert_eq!(PhaseType::IntroAmbient.to_string(), "Intro/Ambient");
        assert_eq!(PhaseType::ClimaxPeak.label(), "Climax/Peak");
        assert_eq!(PhaseType::OutroFade.label(), "Outro/Fade");
    }

    #[test]
    fn test_phases_for_lookup() {
        let batch = BatchSegmentation {
            tracks: vec![
                TrackPhases { index: 0, filename: "a.wav".into(), phases: vec![] },
                TrackPhases { index: 2, filename: "c.wav".into(), phases: vec![] },
            ],
            failures: vec![],
        };
        assert!(batch.phases_for(0).is_some());
        assert!(batch.phases_for(1).is_none());
        assert!(batch.phases_for(2).is_some());
    }
}
