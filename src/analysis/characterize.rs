//! Mood and character labelling contract
//!
//! The core does not decide what a phase or track *feels* like; it hands
//! aggregate descriptors to a [`Characterizer`] and merges the returned
//! labels into its records. [`RangeCharacterizer`] is the stock
//! implementation: every label is a tagged record of descriptor ranges and
//! a label's confidence is the fraction of its ranges the input satisfies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::result::Phase;
use crate::segmentation::frame_series::PhaseDescriptors;

/// Labels assigned to a phase or track, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Characterization {
    /// Mood labels, best first
    pub moods: Vec<String>,
    /// Character labels, best first
    pub characters: Vec<String>,
    /// Confidence (0.0-1.0) per reported label
    pub confidence: BTreeMap<String, f32>,
}

impl Characterization {
    /// Best mood, if any
    pub fn primary_mood(&self) -> Option<&str> {
        self.moods.first().map(String::as_str)
    }

    /// Best character, if any
    pub fn primary_character(&self) -> Option<&str> {
        self.characters.first().map(String::as_str)
    }
}

/// Assigns mood/character labels from aggregate descriptors
pub trait Characterizer: Send + Sync {
    /// Label one set of descriptors
    fn characterize(&self, descriptors: &PhaseDescriptors) -> Characterization;
}

/// Inclusive descriptor ranges that define one label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptorProfile {
    /// Label name
    pub label: &'static str,
    /// Mean RMS energy range
    pub energy: (f32, f32),
    /// Mean spectral centroid range, in Hz
    pub brightness: (f32, f32),
    /// Onsets-per-second range
    pub onset_density: (f32, f32),
}

impl DescriptorProfile {
    /// Fraction of this profile's ranges that `d` falls inside
    pub fn score(&self, d: &PhaseDescriptors) -> f32 {
        let inside = |v: f32, (lo, hi): (f32, f32)| (lo..=hi).contains(&v);
        let hits = [
            inside(d.energy, self.energy),
            inside(d.brightness, self.brightness),
            inside(d.onset_density, self.onset_density),
        ]
        .iter()
        .filter(|&&hit| hit)
        .count();
        hits as f32 / 3.0
    }
}

const fn profile(
    label: &'static str,
    energy: (f32, f32),
    brightness: (f32, f32),
    onset_density: (f32, f32),
) -> DescriptorProfile {
    DescriptorProfile {
        label,
        energy,
        brightness,
        onset_density,
    }
}

/// Mood definitions
pub static MOOD_PROFILES: &[DescriptorProfile] = &[
    profile("atmospheric", (0.0, 0.03), (0.0, 2500.0), (0.0, 1.0)),
    profile("calm", (0.0, 0.04), (0.0, 2000.0), (0.0, 1.5)),
    profile("warm", (0.01, 0.06), (800.0, 2200.0), (0.5, 2.5)),
    profile("dreamy", (0.01, 0.05), (1800.0, 3500.0), (0.0, 1.5)),
    profile("melancholic", (0.01, 0.05), (500.0, 1800.0), (0.3, 2.0)),
    profile("mysterious", (0.01, 0.06), (1000.0, 2500.0), (0.2, 1.5)),
    profile("dark", (0.02, 0.10), (0.0, 1500.0), (0.5, 3.0)),
    profile("hypnotic", (0.03, 0.09), (1200.0, 3000.0), (1.5, 4.0)),
    profile("driving", (0.05, 0.12), (1500.0, 4000.0), (2.0, 6.0)),
    profile("energetic", (0.07, 1.0), (2500.0, 8000.0), (2.5, 10.0)),
    profile("tense", (0.06, 1.0), (3000.0, 10000.0), (1.0, 6.0)),
    profile("euphoric", (0.08, 1.0), (3500.0, 10000.0), (2.0, 8.0)),
    profile("aggressive", (0.10, 1.0), (3000.0, 12000.0), (4.0, 12.0)),
];

/// Character definitions
pub static CHARACTER_PROFILES: &[DescriptorProfile] = &[
    profile("textural", (0.0, 0.05), (0.0, 3000.0), (0.0, 1.0)),
    profile("minimal", (0.0, 0.06), (0.0, 2500.0), (0.5, 2.5)),
    profile("lush", (0.02, 0.08), (1500.0, 3500.0), (0.0, 2.0)),
    profile("melodic", (0.02, 0.10), (2000.0, 4500.0), (0.5, 3.0)),
    profile("crystalline", (0.01, 0.08), (4000.0, 12000.0), (0.0, 3.0)),
    profile("pulsing", (0.04, 0.12), (1000.0, 4000.0), (2.0, 5.0)),
    profile("percussive", (0.05, 1.0), (1500.0, 6000.0), (3.5, 12.0)),
    profile("gritty", (0.06, 1.0), (2500.0, 9000.0), (1.0, 8.0)),
];

/// Range-table characterizer over [`MOOD_PROFILES`] and [`CHARACTER_PROFILES`]
#[derive(Debug, Clone)]
pub struct RangeCharacterizer {
    /// Minimum score for a label to be reported (default: 2/3, i.e. two of three ranges)
    pub acceptance: f32,
}

impl Default for RangeCharacterizer {
    fn default() -> Self {
        Self { acceptance: 2.0 / 3.0 }
    }
}

impl RangeCharacterizer {
    fn rank(&self, profiles: &[DescriptorProfile], d: &PhaseDescriptors) -> Vec<(&'static str, f32)> {
        let mut scored: Vec<(&'static str, f32)> = profiles
            .iter()
            .map(|p| (p.label, p.score(d)))
            .filter(|&(_, s)| s + 1e-6 >= self.acceptance)
            .collect();
        // Stable sort keeps table order among equal scores
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }
}

impl Characterizer for RangeCharacterizer {
    fn characterize(&self, descriptors: &PhaseDescriptors) -> Characterization {
        let moods = self.rank(MOOD_PROFILES, descriptors);
        let characters = self.rank(CHARACTER_PROFILES, descriptors);

        let confidence = moods
            .iter()
            .chain(&characters)
            .map(|&(label, score)| (label.to_string(), score))
            .collect();

        Characterization {
            moods: moods.into_iter().map(|(l, _)| l.to_string()).collect(),
            characters: characters.into_iter().map(|(l, _)| l.to_string()).collect(),
            confidence,
        }
    }
}

/// A phase together with its labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPhase {
    /// The phase
    pub phase: Phase,
    /// Labels assigned to it
    pub characterization: Characterization,
}

/// Run a characterizer over every phase of a track
pub fn annotate_phases(phases: &[Phase], characterizer: &dyn Characterizer) -> Vec<AnnotatedPhase> {
    phases
        .iter()
        .map(|phase| AnnotatedPhase {
            characterization: characterizer.characterize(&phase.descriptors()),
            phase: phase.clone(),
        })
        .collect()
}
