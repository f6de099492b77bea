//! Configuration parameters for segmentation and sequencing

use serde::{Deserialize, Serialize};

/// Change-point detection parameters
///
/// Time-based parameters are converted to frames with the hop length carried
/// by each [`FrameSeries`](crate::segmentation::frame_series::FrameSeries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Moving-average window applied to energy and brightness, in seconds (default: 2.0)
    pub smoothing_window_secs: f32,

    /// Peak height above the change signal's median, as a multiple of its standard deviation (default: 1.5)
    pub peak_height_multiplier: f32,

    /// Minimum distance between two boundaries, in seconds (default: 10.0)
    /// Tracks shorter than this are returned as a single phase.
    pub min_peak_spacing_secs: f32,

    /// Peaks earlier than this are initialization artifacts and ignored, in seconds (default: 5.0)
    pub warmup_secs: f32,

    /// Divisor applied to the brightness gradient before combining with energy (default: 1000.0)
    /// Brightness is in Hz while energy is RMS, so it has to be scaled down.
    pub brightness_scale: f32,

    /// Phase labelling thresholds
    pub thresholds: PhaseThresholds,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            smoothing_window_secs: 2.0,
            peak_height_multiplier: 1.5,
            min_peak_spacing_secs: 10.0,
            warmup_secs: 5.0,
            brightness_scale: 1000.0,
            thresholds: PhaseThresholds::default(),
        }
    }
}

/// Empirically calibrated thresholds for phase labelling
///
/// Positions are normalized to `[0, 1]` across the phases of one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseThresholds {
    /// Mean RMS energy below which a phase counts as quiet (default: 0.05)
    pub low_energy: f32,

    /// Mean RMS energy above which a phase counts as loud (default: 0.08)
    pub high_energy: f32,

    /// Onsets per second below which a phase counts as sparse (default: 1.0)
    pub low_onset_density: f32,

    /// Onsets per second above which a phase counts as busy (default: 2.0)
    pub high_onset_density: f32,

    /// Mean spectral centroid above which a phase counts as bright, in Hz (default: 3000.0)
    pub high_brightness: f32,

    /// Quiet phases at or before this position are intros (default: 0.2)
    pub intro_position: f32,

    /// Quiet phases at or after this position are outros (default: 0.8)
    pub outro_position: f32,

    /// Loud busy phases at or after this position are climaxes rather than build-ups (default: 0.6)
    pub climax_position: f32,

    /// Fallback: positions below this are introductions (default: 0.25)
    pub early_position: f32,

    /// Fallback: positions above this are conclusions (default: 0.75)
    pub late_position: f32,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            low_energy: 0.05,
            high_energy: 0.08,
            low_onset_density: 1.0,
            high_onset_density: 2.0,
            high_brightness: 3000.0,
            intro_position: 0.2,
            outro_position: 0.8,
            climax_position: 0.6,
            early_position: 0.25,
            late_position: 0.75,
        }
    }
}

/// How the greedy sequence is refined after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefinementStrategy {
    /// One forward sweep of adjacent swaps
    SingleSweep,
    /// Repeat sweeps until no swap improves the flow, or `max_passes` is reached
    UntilStable {
        /// Upper bound on the number of sweeps
        max_passes: usize,
    },
}

/// Sequencing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencingConfig {
    /// Refinement applied after greedy construction (default: SingleSweep)
    pub refinement: RefinementStrategy,
}

impl Default for SequencingConfig {
    fn default() -> Self {
        Self {
            refinement: RefinementStrategy::SingleSweep,
        }
    }
}
