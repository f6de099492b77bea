//! Error types for segmentation and sequencing

use std::fmt;

/// Errors that can occur during segmentation or sequencing
///
/// `DegenerateSignal` and `InsufficientDuration` are recoverable: the phase
/// detector falls back to a single whole-track phase when it sees them.
/// `MissingDescriptor` only ever surfaces as a logged warning.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Change signal is flat: no variance, or variance negligible next to its level
    DegenerateSignal(String),

    /// Track is shorter than the minimum phase spacing
    InsufficientDuration {
        /// Track duration in seconds
        duration: f32,
        /// Minimum duration needed to split the track, in seconds
        minimum: f32,
    },

    /// A track record lacks a required descriptor
    MissingDescriptor {
        /// Filename of the offending track
        track: String,
        /// Name of the missing field
        field: &'static str,
    },
}

impl AnalysisError {
    /// Whether the phase detector recovers from this error with a single phase
    pub fn is_single_phase_fallback(&self) -> bool {
        matches!(
            self,
            AnalysisError::DegenerateSignal(_) | AnalysisError::InsufficientDuration { .. }
        )
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::DegenerateSignal(msg) => write!(f, "Degenerate signal: {}", msg),
            AnalysisError::InsufficientDuration { duration, minimum } => write!(
                f,
                "Insufficient duration: {:.2}s is shorter than {:.2}s",
                duration, minimum
            ),
            AnalysisError::MissingDescriptor { track, field } => {
                write!(f, "Missing descriptor: '{}' has no {}", track, field)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
