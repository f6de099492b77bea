//! Peak detection over change signals
//!
//! Finds local maxima that clear a height threshold and are separated by a
//! minimum distance. Flat-topped maxima (plateaus) are reported once, at
//! their middle sample, since smoothing a step produces exactly that shape.

/// Find peaks in a signal
///
/// # Arguments
///
/// * `signal` - Signal to find peaks in
/// * `threshold` - Minimum peak height (absolute)
/// * `min_distance` - Minimum distance between peaks (in samples)
///
/// # Returns
///
/// Vector of (index, value) pairs for detected peaks, sorted by index
///
/// # Algorithm
///
/// 1. Find all local maxima, treating a run of equal values bordered by
///    lower values on both sides as a single maximum at its center
/// 2. Filter by threshold
/// 3. Enforce minimum distance (keep the highest peak when too close)
/// 4. Sort by index
///
/// The first and last samples are never peaks.
///
/// # Example
///
/// ```
/// use synthflow::segmentation::peak_picking::find_peaks;
///
/// let signal = vec![0.0, 0.5, 1.0, 0.7, 0.3, 0.9, 0.2];
/// let peaks = find_peaks(&signal, 0.5, 2);
/// assert_eq!(peaks, vec![(2, 1.0), (5, 0.9)]);
/// ```
pub fn find_peaks(signal: &[f64], threshold: f64, min_distance: usize) -> Vec<(usize, f64)> {
    log::debug!(
        "Finding peaks in signal of length {}, threshold={:.6}, min_distance={}",
        signal.len(),
        threshold,
        min_distance
    );

    if signal.len() < 3 {
        return vec![];
    }

    let n = signal.len();
    let mut peaks = Vec::new();
    let mut i = 1;
    while i < n - 1 {
        if signal[i] > signal[i - 1] {
            // Walk across a possible plateau
            let mut j = i;
            while j + 1 < n && signal[j + 1] == signal[i] {
                j += 1;
            }
            if j + 1 < n && signal[j + 1] < signal[i] {
                let center = (i + j) / 2;
                if signal[center] >= threshold {
                    peaks.push((center, signal[center]));
                }
            }
            i = j + 1;
        } else {
            i += 1;
        }
    }

    if min_distance > 1 && peaks.len() > 1 {
        // Highest first, earlier index wins ties
        peaks.sort_by(|a, b| {
            b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
        });

        let mut kept: Vec<(usize, f64)> = Vec::with_capacity(peaks.len());
        for (idx, value) in peaks {
            let too_close = kept
                .iter()
                .any(|&(existing, _)| idx.abs_diff(existing) < min_distance);
            if !too_close {
                kept.push((idx, value));
            }
        }
        peaks = kept;
    }

    peaks.sort_by_key(|&(idx, _)| idx);

    log::debug!("Found {} peaks", peaks.len());

    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_peaks_basic() {
        let signal = vec![0.0, 0.5, 1.0, 0.7, 0.3, 0.9, 0.2];
        let peaks = find_peaks(&signal, 0.5, 2);
        assert_eq!(peaks, vec![(2, 1.0), (5, 0.9)]);
    }

    #[test]
    fn test_find_peaks_too_short() {
        assert!(find_peaks(&[], 0.0, 1).is_empty());
        assert!(find_peaks(&[1.0, 2.0], 0.0, 1).is_empty());
    }

    #[test]
    fn test_find_peaks_threshold() {
        let signal = vec![0.1, 0.2, 0.3, 0.4, 0.3, 0.2, 0.1];
        assert_eq!(find_peaks(&signal, 0.35, 1), vec![(3, 0.4)]);
        assert!(find_peaks(&signal, 0.5, 1).is_empty());
    }

    #[test]
    fn test_find_peaks_min_distance_keeps_highest() {
        let signal = vec![0.0, 0.5, 0.8, 0.4, 1.0, 0.3, 0.1];
        let peaks = find_peaks(&signal, 0.3, 3);
        assert_eq!(peaks, vec![(4, 1.0)]);
    }

    #[test]
    fn test_find_peaks_plateau_center() {
        let signal = vec![0.0, 0.2, 1.0, 1.0, 1.0, 1.0, 1.0, 0.2, 0.0];
        assert_eq!(find_peaks(&signal, 0.5, 1), vec![(4, 1.0)]);
    }

    #[test]
    fn test_find_peaks_rising_edge_is_not_a_peak() {
        // Plateau running into the end of the signal
        let signal = vec![0.0, 0.5, 1.0, 1.0, 1.0];
        assert!(find_peaks(&signal, 0.0, 1).is_empty());
        // Monotone ramp
        let ramp: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert!(find_peaks(&ramp, 0.0, 1).is_empty());
    }

    #[test]
    fn test_find_peaks_sorted_by_index() {
        let signal = vec![0.0, 0.9, 0.0, 0.3, 0.0, 0.6, 0.0];
        let peaks = find_peaks(&signal, 0.1, 1);
        let indices: Vec<usize> = peaks.iter().map(|p| p.0).collect();
        assert_eq!(indices, vec![1, 3, 5]);
    }
}
