//! # Synthflow
//!
//! Structural segmentation and flow sequencing for long-form electronic and
//! synthesizer recordings.
//!
//! ## Features
//!
//! - **Structural Segmentation**: change-point detection over per-frame
//!   descriptor series, producing contiguous, labelled phases
//! - **Flow Sequencing**: directional multi-criteria transition scoring,
//!   greedy construction and adjacent-swap refinement into a listening order
//! - **Batch Segmentation**: per-track parallelism with deterministic,
//!   input-ordered results
//!
//! ## Quick Start
//!
//! ```no_run
//! use synthflow::{detect_phases, recommend_sequence, FrameSeries, Track};
//!
//! // Frame series from your feature extractor
//! let series: FrameSeries = todo!();
//! let phases = detect_phases(&series, 22050)?;
//! for phase in &phases {
//!     println!("{}: {:.1}s - {:.1}s", phase.phase_type, phase.start_time, phase.end_time);
//! }
//!
//! // Track records from your feature extractor and mood classifier
//! let tracks: Vec<Track> = vec![];
//! for entry in recommend_sequence(&tracks) {
//!     println!("{}. {} - {}", entry.position, entry.track.filename, entry.reasoning);
//! }
//! # Ok::<(), synthflow::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! FrameSeries → ChangePointDetector → PhaseClassifier → Phases
//! Tracks → SequenceBuilder → SequenceRefiner → Explainer → Sequence
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod segmentation;
pub mod sequencing;

// Re-export main types
pub use analysis::characterize::{Characterization, Characterizer, RangeCharacterizer};
pub use analysis::result::{BatchSegmentation, Phase, PhaseType, TrackPhases};
pub use config::{PhaseThresholds, RefinementStrategy, SegmentationConfig, SequencingConfig};
pub use error::AnalysisError;
pub use segmentation::batch::detect_phases_batch;
pub use segmentation::change_point::{ChangePointDetector, PhaseDetector};
pub use segmentation::frame_series::{FrameSeries, PhaseDescriptors};
pub use sequencing::compatibility::CompatibilityModel;
pub use sequencing::key::Key;
pub use sequencing::scorer::{TransitionScore, TransitionScorer};
pub use sequencing::sequencer::{FlowSequencer, SequenceEntry};
pub use sequencing::track::{Track, TrackDescriptor};

/// Split a track into labelled phases
///
/// Uses [`SegmentationConfig::default`]; see [`PhaseDetector`] for tuned runs.
///
/// # Arguments
///
/// * `series` - Per-frame descriptors and onsets of one track
/// * `sample_rate` - Sample rate the series was computed at, in Hz
///
/// # Returns
///
/// Contiguous phases covering `[0, duration]`. Tracks that are too short or
/// have a flat change signal come back as a single phase.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidInput` if the series is malformed
/// (misaligned channels, zero hop, non-finite values, ...)
///
/// # Example
///
/// ```
/// use synthflow::{detect_phases, FrameSeries};
///
/// let frames = 2000;
/// let series = FrameSeries {
///     hop_length: 512,
///     energy: vec![0.02; frames],
///     brightness: vec![1500.0; frames],
///     rolloff: vec![4000.0; frames],
///     zero_crossing_rate: vec![0.05; frames],
///     onsets: vec![],
///     duration: None,
/// };
/// let phases = detect_phases(&series, 22050)?;
/// assert_eq!(phases.len(), 1);
/// # Ok::<(), synthflow::AnalysisError>(())
/// ```
pub fn detect_phases(series: &FrameSeries, sample_rate: u32) -> Result<Vec<Phase>, AnalysisError> {
    PhaseDetector::default().detect(series, sample_rate)
}

/// Recommend a listening order for a collection of tracks
///
/// Picks an opener, greedily appends the best-following track, applies one
/// sweep of adjacent-swap refinement and attaches reasoning to each slot.
/// The output is a permutation of the input; an empty input gives an empty
/// sequence.
///
/// # Example
///
/// ```
/// use synthflow::{recommend_sequence, Track};
///
/// let tracks = vec![Track::neutral("solo.wav")];
/// let sequence = recommend_sequence(&tracks);
/// assert_eq!(sequence.len(), 1);
/// assert_eq!(sequence[0].position, 1);
/// ```
pub fn recommend_sequence(tracks: &[Track]) -> Vec<SequenceEntry> {
    FlowSequencer::default().recommend(tracks)
}

/// Resolve raw descriptors (defaulting missing fields) and recommend an order
pub fn recommend_sequence_from_descriptors(descriptors: Vec<TrackDescriptor>) -> Vec<SequenceEntry> {
    let tracks: Vec<Track> = descriptors.into_iter().map(Track::from_descriptor).collect();
    recommend_sequence(&tracks)
}
