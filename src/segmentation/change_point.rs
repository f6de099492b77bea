//! Change-point detection over descriptor time series
//!
//! Finds the boundaries between musically coherent phases of a track.
//!
//! # Algorithm
//!
//! 1. Smooth energy and brightness independently with a moving average
//! 2. Take the discrete gradient of each smoothed channel
//! 3. Combine into a change signal `|Δenergy| + |Δbrightness| / brightness_scale`
//! 4. Pick peaks rising more than `peak_height_multiplier × std(change signal)`
//!    above the signal's median and at least `min_peak_spacing_secs` apart
//! 5. Drop peaks inside the warm-up window
//! 6. Boundaries are `{0} ∪ peaks ∪ {duration}`, sorted and deduplicated

use super::classifier::PhaseClassifier;
use super::frame_series::FrameSeries;
use super::peak_picking::find_peaks;
use super::smoothing::{gradient, mean, median, moving_average, std_dev};
use crate::analysis::result::Phase;
use crate::config::SegmentationConfig;
use crate::error::AnalysisError;

/// Numerical stability epsilon
const EPSILON: f64 = 1e-8;

/// A change signal whose spread is below this fraction of its mean is flat
const MIN_RELATIVE_SPREAD: f64 = 1e-3;

/// Boundary finder for a single track
#[derive(Debug, Clone, Default)]
pub struct ChangePointDetector {
    config: SegmentationConfig,
}

impl ChangePointDetector {
    /// Create a detector with the given configuration
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Combined change signal, one value per frame
    ///
    /// A steady ramp in either channel gives a constant signal away from the
    /// track edges; only a change in slope shows up as a peak.
    pub fn change_signal(&self, series: &FrameSeries, sample_rate: u32) -> Vec<f64> {
        let hop = series.hop_seconds(sample_rate);
        let window = ((self.config.smoothing_window_secs / hop).round() as usize).max(1);

        let energy = gradient(&moving_average(&series.energy, window));
        let brightness = gradient(&moving_average(&series.brightness, window));
        let scale = match self.config.brightness_scale as f64 {
            s if s.abs() > EPSILON => s,
            _ => 1.0,
        };

        energy
            .iter()
            .zip(&brightness)
            .map(|(e, b)| e.abs() + b.abs() / scale)
            .collect()
    }

    /// Detect phase boundaries
    ///
    /// # Returns
    ///
    /// Strictly increasing boundary times in seconds, starting at 0 and
    /// ending at the track duration
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the series or configuration is malformed
    /// - `InsufficientDuration` if the track is shorter than the minimum spacing
    /// - `DegenerateSignal` if the change signal has no variance
    pub fn detect(&self, series: &FrameSeries, sample_rate: u32) -> Result<Vec<f32>, AnalysisError> {
        series.validate(sample_rate)?;
        self.validate_config()?;

        let duration = series.duration_seconds(sample_rate);
        if duration < self.config.min_peak_spacing_secs {
            return Err(AnalysisError::InsufficientDuration {
                duration,
                minimum: self.config.min_peak_spacing_secs,
            });
        }

        log::debug!(
            "Detecting change points: {} frames, {:.2}s at {} Hz",
            series.len(),
            duration,
            sample_rate
        );

        let signal = self.change_signal(series, sample_rate);
        let spread = std_dev(&signal);
        let level = mean(&signal).abs();
        if !spread.is_finite() || spread < EPSILON || spread < MIN_RELATIVE_SPREAD * level {
            return Err(AnalysisError::DegenerateSignal(format!(
                "change signal std-dev is {:e} (mean {:e}) over {} frames",
                spread,
                level,
                signal.len()
            )));
        }

        let hop = series.hop_seconds(sample_rate);
        // Height is measured from the typical level, so a constant slope never clears it
        let baseline = median(&signal);
        let threshold = baseline + self.config.peak_height_multiplier as f64 * spread;
        let min_distance = ((self.config.min_peak_spacing_secs / hop).round() as usize).max(1);

        let mut boundaries = vec![0.0f32];
        boundaries.extend(
            find_peaks(&signal, threshold, min_distance)
                .into_iter()
                .map(|(idx, _)| idx as f32 * hop)
                .filter(|&t| t >= self.config.warmup_secs && t > 0.0 && t < duration),
        );
        boundaries.push(duration);
        boundaries.sort_by(|a, b| a.total_cmp(b));
        boundaries.dedup_by(|a, b| (*a - *b).abs() < EPSILON as f32);

        log::debug!(
            "Change signal baseline={:.3e}, threshold={:.3e}, {} boundaries",
            baseline,
            threshold,
            boundaries.len()
        );

        Ok(boundaries)
    }

    /// Detect boundaries, falling back to the whole track on recoverable errors
    ///
    /// # Errors
    ///
    /// Only `InvalidInput`; degenerate and too-short tracks yield `[0, duration]`.
    pub fn detect_or_whole(&self, series: &FrameSeries, sample_rate: u32) -> Result<Vec<f32>, AnalysisError> {
        match self.detect(series, sample_rate) {
            Ok(boundaries) => Ok(boundaries),
            Err(err) if err.is_single_phase_fallback() => {
                log::info!("Using a single phase: {}", err);
                Ok(vec![0.0, series.duration_seconds(sample_rate)])
            }
            Err(err) => Err(err),
        }
    }

    fn validate_config(&self) -> Result<(), AnalysisError> {
        let c = &self.config;
        let all_valid = [
            c.smoothing_window_secs,
            c.peak_height_multiplier,
            c.min_peak_spacing_secs,
            c.warmup_secs,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0);
        if all_valid {
            Ok(())
        } else {
            Err(AnalysisError::InvalidInput(
                "Segmentation parameters must be finite and non-negative".to_string(),
            ))
        }
    }
}

/// Segmentation pipeline: boundaries, aggregation, labelling
#[derive(Debug, Clone, Default)]
pub struct PhaseDetector {
    detector: ChangePointDetector,
    classifier: PhaseClassifier,
}

impl PhaseDetector {
    /// Create a pipeline with the given configuration
    pub fn new(config: SegmentationConfig) -> Self {
        Self {
            classifier: PhaseClassifier::new(config.thresholds.clone()),
            detector: ChangePointDetector::new(config),
        }
    }

    /// Split a track into labelled phases
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` for a malformed series. Flat or
    /// short tracks are not errors: they come back as a single phase.
    pub fn detect(&self, series: &FrameSeries, sample_rate: u32) -> Result<Vec<Phase>, AnalysisError> {
        let boundaries = self.detector.detect_or_whole(series, sample_rate)?;
        let total = boundaries.len() - 1;

        let phases: Vec<Phase> = boundaries
            .windows(2)
            .enumerate()
            .map(|(i, bounds)| {
                let (start, end) = (bounds[0], bounds[1]);
                let d = series.aggregate(start, end, sample_rate, i + 1 == total);
                Phase {
                    index: i + 1,
                    start_time: start,
                    end_time: end,
                    duration: end - start,
                    phase_type: self.classifier.classify(&d, i, total),
                    avg_energy: d.energy,
                    avg_brightness: d.brightness,
                    avg_roughness: d.roughness,
                    avg_rolloff: d.rolloff,
                    onset_density: d.onset_density,
                }
            })
            .collect();

        log::debug!(
            "Detected {} phases: {}",
            phases.len(),
            phases
                .iter()
                .map(|p| format!("{}@{:.1}s", p.phase_type, p.start_time))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(phases)
    }
}
