//! Parallel segmentation of a track collection
//!
//! Parallelism is across tracks; each track is still segmented on a single
//! thread. Every task owns its result and the results are merged by input
//! position once all tasks are done, so the output never depends on which
//! worker finished first.

use rayon::prelude::*;

use super::change_point::PhaseDetector;
use super::frame_series::FrameSeries;
use crate::analysis::result::{BatchSegmentation, SegmentationFailure, TrackPhases};
use crate::config::SegmentationConfig;

/// Default worker count: available CPU threads minus one, at least one
pub fn default_jobs() -> usize {
    let n = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

/// Segment many tracks concurrently
///
/// A track that fails (malformed series) is reported in
/// [`BatchSegmentation::failures`] and does not affect the others.
///
/// # Arguments
///
/// * `inputs` - `(filename, frame series)` pairs in collection order
/// * `sample_rate` - Sample rate the series were computed at
/// * `config` - Segmentation parameters shared by all tracks
/// * `jobs` - Worker threads (default: [`default_jobs`])
pub fn detect_phases_batch(
    inputs: &[(String, FrameSeries)],
    sample_rate: u32,
    config: &SegmentationConfig,
    jobs: Option<usize>,
) -> BatchSegmentation {
    let detector = PhaseDetector::new(config.clone());
    let jobs = jobs.unwrap_or_else(default_jobs).max(1);

    log::debug!("Segmenting {} tracks, jobs={}", inputs.len(), jobs);

    let run = || {
        inputs
            .par_iter()
            .enumerate()
            .map(|(index, (filename, series))| (index, filename, detector.detect(series, sample_rate)))
            .collect::<Vec<_>>()
    };

    let mut outcomes = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            log::warn!("Could not build a {}-thread pool ({}), using the global pool", jobs, e);
            run()
        }
    };
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut batch = BatchSegmentation::default();
    for (index, filename, outcome) in outcomes {
        match outcome {
            Ok(phases) => batch.tracks.push(TrackPhases {
                index,
                filename: filename.clone(),
                phases,
            }),
            Err(error) => {
                log::warn!("Segmentation failed for '{}': {}", filename, error);
                batch.failures.push(SegmentationFailure {
                    index,
                    filename: filename.clone(),
                    error,
                });
            }
        }
    }

    log::debug!(
        "Segmented {} tracks, {} failures",
        batch.tracks.len(),
        batch.failures.len()
    );

    batch
}
