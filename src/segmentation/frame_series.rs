//! Per-frame descriptor series supplied by the feature extractor
//!
//! A [`FrameSeries`] carries one value per hop for each descriptor channel
//! plus onset timestamps in seconds. It is owned by a single segmentation
//! call and never persisted.

use serde::{Deserialize, Serialize};

use super::smoothing::mean;
use crate::error::AnalysisError;

/// Frame-aligned descriptor channels for one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSeries {
    /// Hop length in samples between consecutive frames
    pub hop_length: usize,

    /// RMS energy per frame
    pub energy: Vec<f32>,

    /// Spectral centroid per frame, in Hz
    pub brightness: Vec<f32>,

    /// Spectral rolloff per frame, in Hz
    pub rolloff: Vec<f32>,

    /// Zero-crossing rate per frame (0.0-1.0); used as the roughness descriptor
    pub zero_crossing_rate: Vec<f32>,

    /// Onset timestamps in seconds
    pub onsets: Vec<f32>,

    /// Exact track duration in seconds, when known
    ///
    /// Falls back to `frames × hop / sample_rate` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
}

/// Aggregate descriptors of one bounded interval of a track
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseDescriptors {
    /// Mean RMS energy
    pub energy: f32,
    /// Mean spectral centroid, in Hz
    pub brightness: f32,
    /// Mean zero-crossing rate
    pub roughness: f32,
    /// Mean spectral rolloff, in Hz
    pub rolloff: f32,
    /// Onsets per second
    pub onset_density: f32,
}

impl FrameSeries {
    /// Number of frames
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    /// True when the series holds no frames
    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    /// Seconds between consecutive frames
    pub fn hop_seconds(&self, sample_rate: u32) -> f32 {
        self.hop_length as f32 / sample_rate as f32
    }

    /// Track duration in seconds
    pub fn duration_seconds(&self, sample_rate: u32) -> f32 {
        self.duration
            .unwrap_or_else(|| self.len() as f32 * self.hop_seconds(sample_rate))
    }

    /// Check channel alignment and value sanity
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the sample rate or hop is zero,
    /// the series is empty, channel lengths differ, or any value is non-finite.
    pub fn validate(&self, sample_rate: u32) -> Result<(), AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput("Invalid sample rate".to_string()));
        }
        if self.hop_length == 0 {
            return Err(AnalysisError::InvalidInput("Hop length must be positive".to_string()));
        }
        if self.is_empty() {
            return Err(AnalysisError::InvalidInput("Empty frame series".to_string()));
        }

        let n = self.len();
        for (name, channel) in [
            ("brightness", &self.brightness),
            ("rolloff", &self.rolloff),
            ("zero_crossing_rate", &self.zero_crossing_rate),
        ] {
            if channel.len() != n {
                return Err(AnalysisError::InvalidInput(format!(
                    "Inconsistent channel lengths: energy has {} frames, {} has {}",
                    n,
                    name,
                    channel.len()
                )));
            }
        }

        let all_finite = self
            .energy
            .iter()
            .chain(&self.brightness)
            .chain(&self.rolloff)
            .chain(&self.zero_crossing_rate)
            .chain(&self.onsets)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(AnalysisError::InvalidInput(
                "Frame series contains non-finite values".to_string(),
            ));
        }

        match self.duration {
            Some(d) if !(d.is_finite() && d > 0.0) => Err(AnalysisError::InvalidInput(format!(
                "Invalid track duration: {}",
                d
            ))),
            _ => Ok(()),
        }
    }

    /// Aggregate the descriptors over `[start, end)` seconds
    ///
    /// When `closed` is set the interval includes `end` for onset counting,
    /// which is what the final phase of a track needs. An interval narrower
    /// than one hop still reads the frame it starts in.
    pub fn aggregate(&self, start: f32, end: f32, sample_rate: u32, closed: bool) -> PhaseDescriptors {
        let n = self.len();
        if n == 0 {
            return PhaseDescriptors::default();
        }
        let hop = self.hop_seconds(sample_rate);
        let first = ((start / hop).floor().max(0.0) as usize).min(n - 1);
        let last = ((end / hop).ceil().max(0.0) as usize).clamp(first + 1, n);
        let range = first..last;

        let onset_count = self
            .onsets
            .iter()
            .filter(|&&t| t >= start && (t < end || (closed && t <= end)))
            .count();
        let span = end - start;

        PhaseDescriptors {
            energy: mean(&self.energy[range.clone()]) as f32,
            brightness: mean(&self.brightness[range.clone()]) as f32,
            roughness: mean(&self.zero_crossing_rate[range.clone()]) as f32,
            rolloff: mean(&self.rolloff[range]) as f32,
            onset_density: if span > 0.0 {
                onset_count as f32 / span
            } else {
                0.0
            },
        }
    }
}
