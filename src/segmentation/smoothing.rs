//! Signal conditioning for change-point detection
//!
//! Moving-average smoothing, discrete gradient and spread statistics over
//! per-frame descriptor channels. Everything downstream of the raw f32
//! channels is computed in f64 so that rounding ripple on a steady slope
//! cannot pose as a change point.

/// Centered moving average with edge-truncated windows
///
/// Each output value is the mean of the samples inside a `window`-wide
/// window centered on it. Near the edges the window is clipped to the
/// signal and the mean is taken over the samples actually present, so a
/// constant signal stays constant all the way to both ends.
///
/// # Arguments
///
/// * `signal` - Input signal
/// * `window` - Window width in samples (values below 1 are treated as 1)
///
/// # Returns
///
/// Smoothed signal with the same length as the input
///
/// # Example
///
/// ```
/// use synthflow::segmentation::smoothing::moving_average;
///
/// let smoothed = moving_average(&[0.0, 0.0, 3.0, 0.0, 0.0], 3);
/// assert_eq!(smoothed, vec![0.0, 1.0, 1.0, 1.0, 0.0]);
/// ```
pub fn moving_average(signal: &[f32], window: usize) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }
    let window = window.max(1);
    let half = window / 2;

    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0f64);
    for &x in signal {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + x as f64);
    }

    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + window - half).min(n);
            let count = (hi - lo) as f64;
            (prefix[hi] - prefix[lo]) / count
        })
        .collect()
}

/// Discrete gradient of a uniformly sampled signal
///
/// Central differences in the interior, one-sided differences at the ends.
/// A signal with fewer than two samples has a zero gradient.
pub fn gradient(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut out = Vec::with_capacity(n);
            out.push(signal[1] - signal[0]);
            for i in 1..n - 1 {
                out.push((signal[i + 1] - signal[i - 1]) * 0.5);
            }
            out.push(signal[n - 1] - signal[n - 2]);
            out
        }
    }
}

/// Arithmetic mean (0.0 for an empty slice)
pub fn mean<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v.into()).sum::<f64>() / values.len() as f64
}

/// Population standard deviation (0.0 for an empty slice)
pub fn std_dev<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values
        .iter()
        .map(|&v| {
            let d = v.into() - m;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    var.sqrt()
}

/// Median (0.0 for an empty slice)
///
/// Even-length input averages the two middle values.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) * 0.5
    } else {
        sorted[mid]
    }
}
