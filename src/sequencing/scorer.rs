//! Directional transition scoring
//!
//! Additive points model over independent criteria. Each criterion awards a
//! fixed number of points when its condition holds; there is no partial
//! credit and no normalization. Scores are only meaningful relative to other
//! candidates following the same track, and `score(a, b)` generally differs
//! from `score(b, a)`.

use serde::{Deserialize, Serialize};

use super::compatibility::CompatibilityModel;
use super::track::Track;

const KEY_IDENTICAL: f32 = 10.0;
const KEY_RELATED: f32 = 5.0;
const KEY_CONFIDENT_BONUS: f32 = 2.0;
const KEY_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// (max |Δtempo| in BPM, points), checked in order
const TEMPO_STEPS: [(f32, f32); 3] = [(10.0, 8.0), (20.0, 5.0), (40.0, 2.0)];

/// (max |Δenergy|, points), checked in order
const ENERGY_STEPS: [(f32, f32); 2] = [(0.02, 6.0), (0.05, 3.0)];
const ENERGY_LIFT_MAX: f32 = 0.03;
const ENERGY_LIFT_BONUS: f32 = 3.0;

const MOOD_IDENTICAL: f32 = 4.0;
// Compatible-but-different outranks identical: gentle evolution over repetition
const MOOD_RELATED: f32 = 7.0;

const CHARACTER_IDENTICAL: f32 = 4.0;
const CHARACTER_RELATED: f32 = 2.0;

const DURATION_RANGE: (f32, f32) = (30.0, 300.0);
const DURATION_IN_RANGE: f32 = 3.0;
const DURATION_GROWS: f32 = 1.0;

/// (max |Δbrightness| in Hz, points), checked in order
const BRIGHTNESS_STEPS: [(f32, f32); 2] = [(500.0, 3.0), (1000.0, 1.0)];

const SAME_CLUSTER: f32 = 2.0;

/// Per-criterion points for one directed transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionScore {
    /// Harmonic compatibility
    pub key: f32,
    /// Tempo proximity
    pub tempo: f32,
    /// Energy proximity and gentle lift
    pub energy: f32,
    /// Mood continuity
    pub mood: f32,
    /// Character continuity
    pub character: f32,
    /// Duration suitability
    pub duration: f32,
    /// Brightness proximity
    pub brightness: f32,
    /// Shared similarity cluster
    pub cluster: f32,
    /// Sum of all criteria
    pub total: f32,
}

/// Scores ordered track pairs against a compatibility model
#[derive(Debug, Clone, Copy)]
pub struct TransitionScorer<'a> {
    model: &'a CompatibilityModel,
}

impl Default for TransitionScorer<'static> {
    fn default() -> Self {
        Self::new(CompatibilityModel::global())
    }
}

fn stepped(delta: f32, steps: &[(f32, f32)]) -> f32 {
    steps
        .iter()
        .find(|(limit, _)| delta < *limit)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

impl<'a> TransitionScorer<'a> {
    /// Create a scorer over the given model
    pub fn new(model: &'a CompatibilityModel) -> Self {
        Self { model }
    }

    /// Compatibility model in use
    pub fn model(&self) -> &'a CompatibilityModel {
        self.model
    }

    /// Score the transition `current → candidate` criterion by criterion
    pub fn breakdown(&self, current: &Track, candidate: &Track) -> TransitionScore {
        let m = self.model;

        let mut key = if m.same_key(&current.key, &candidate.key) {
            KEY_IDENTICAL
        } else if m.keys_related(&current.key, &candidate.key) {
            KEY_RELATED
        } else {
            0.0
        };
        if current.key_confidence > KEY_CONFIDENCE_THRESHOLD
            && candidate.key_confidence > KEY_CONFIDENCE_THRESHOLD
        {
            key += KEY_CONFIDENT_BONUS;
        }

        let tempo = stepped((current.tempo - candidate.tempo).abs(), &TEMPO_STEPS);

        let energy_delta = candidate.energy - current.energy;
        let mut energy = stepped(energy_delta.abs(), &ENERGY_STEPS);
        if energy_delta > 0.0 && energy_delta < ENERGY_LIFT_MAX {
            energy += ENERGY_LIFT_BONUS;
        }

        let mood = if current.mood.trim().eq_ignore_ascii_case(candidate.mood.trim()) {
            MOOD_IDENTICAL
        } else if m.moods_related(&current.mood, &candidate.mood) {
            MOOD_RELATED
        } else {
            0.0
        };

        let character = if current.character.trim().eq_ignore_ascii_case(candidate.character.trim()) {
            CHARACTER_IDENTICAL
        } else if m.characters_related(&current.character, &candidate.character) {
            CHARACTER_RELATED
        } else {
            0.0
        };

        let in_range = |d: f32| (DURATION_RANGE.0..=DURATION_RANGE.1).contains(&d);
        let mut duration = 0.0;
        if in_range(current.duration) && in_range(candidate.duration) {
            duration += DURATION_IN_RANGE;
        }
        if candidate.duration > current.duration {
            duration += DURATION_GROWS;
        }

        let brightness = stepped((current.brightness - candidate.brightness).abs(), &BRIGHTNESS_STEPS);

        let cluster = match (current.cluster_id, candidate.cluster_id) {
            (Some(a), Some(b)) if a == b => SAME_CLUSTER,
            _ => 0.0,
        };

        TransitionScore {
            key,
            tempo,
            energy,
            mood,
            character,
            duration,
            brightness,
            cluster,
            total: key + tempo + energy + mood + character + duration + brightness + cluster,
        }
    }

    /// Total score of the transition `current → candidate`
    pub fn score(&self, current: &Track, candidate: &Track) -> f32 {
        self.breakdown(current, candidate).total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str) -> Track {
        Track {
            duration: 200.0,
            ..Track::neutral(name)
        }
    }

    #[test]
    fn test_identical_tracks() {
        let scorer = TransitionScorer::default();
        let a = track("a");
        let s = scorer.breakdown(&a, &a);
        assert_eq!(s.key, 10.0);
        assert_eq!(s.tempo, 8.0);
        assert_eq!(s.energy, 6.0);
        assert_eq!(s.mood, 4.0);
        assert_eq!(s.character, 4.0);
        assert_eq!(s.duration, 3.0);
        assert_eq!(s.brightness, 3.0);
        assert_eq!(s.cluster, 0.0);
        assert_eq!(s.total, 38.0);
    }

    #[test]
    fn test_key_points() {
        let scorer = TransitionScorer::default();
        let a = Track { key: "C".into(), ..track("a") };
        let related = Track { key: "G".into(), ..track("b") };
        let distant = Track { key: "F#".into(), ..track("c") };
        assert_eq!(scorer.breakdown(&a, &related).key, 5.0);
        assert_eq!(scorer.breakdown(&a, &distant).key, 0.0);

        let confident_a = Track { key_confidence: 0.9, ..a.clone() };
        let confident_b = Track { key_confidence: 0.8, ..distant.clone() };
        assert_eq!(scorer.breakdown(&confident_a, &confident_b).key, 2.0);
        let lukewarm = Track { key_confidence: 0.7, ..distant };
        assert_eq!(scorer.breakdown(&confident_a, &lukewarm).key, 0.0);
    }

    #[test]
    fn test_tempo_steps() {
        let scorer = TransitionScorer::default();
        let a = Track { tempo: 120.0, ..track("a") };
        let at = |bpm: f32| scorer.breakdown(&a, &Track { tempo: bpm, ..track("b") }).tempo;
        assert_eq!(at(125.0), 8.0);
        assert_eq!(at(130.0), 5.0);
        assert_eq!(at(105.0), 5.0);
        assert_eq!(at(150.0), 2.0);
        assert_eq!(at(160.0), 0.0);
    }

    #[test]
    fn test_energy_lift_bonus_is_directional() {
        let scorer = TransitionScorer::default();
        let low = Track { energy: 0.03, ..track("low") };
        let high = Track { energy: 0.045, ..track("high") };
        assert_eq!(scorer.breakdown(&low, &high).energy, 9.0);
        assert_eq!(scorer.breakdown(&high, &low).energy, 6.0);

        let far = Track { energy: 0.07, ..track("far") };
        assert_eq!(scorer.breakdown(&low, &far).energy, 3.0);
        let farther = Track { energy: 0.2, ..track("farther") };
        assert_eq!(scorer.breakdown(&low, &farther).energy, 0.0);
    }

    #[test]
    fn test_related_mood_beats_identical() {
        let scorer = TransitionScorer::default();
        let warm = Track { mood: "warm".into(), ..track("a") };
        let driving = Track { mood: "driving".into(), ..track("b") };
        assert_eq!(scorer.breakdown(&warm, &warm).mood, 4.0);
        assert_eq!(scorer.breakdown(&warm, &driving).mood, 7.0);
        assert_eq!(scorer.breakdown(&driving, &warm).mood, 0.0);
    }

    #[test]
    fn test_character_points() {
        let scorer = TransitionScorer::default();
        let pulsing = Track { character: "pulsing".into(), ..track("a") };
        let percussive = Track { character: "percussive".into(), ..track("b") };
        let crystalline = Track { character: "crystalline".into(), ..track("c") };
        assert_eq!(scorer.breakdown(&pulsing, &percussive).character, 2.0);
        assert_eq!(scorer.breakdown(&pulsing, &crystalline).character, 0.0);
    }

    #[test]
    fn test_duration_brightness_cluster() {
        let scorer = TransitionScorer::default();
        let a = Track { duration: 100.0, brightness: 2000.0, cluster_id: Some(1), ..track("a") };
        let b = Track { duration: 400.0, brightness: 2700.0, cluster_id: Some(1), ..track("b") };
        let s = scorer.breakdown(&a, &b);
        assert_eq!(s.duration, 1.0);
        assert_eq!(s.brightness, 1.0);
        assert_eq!(s.cluster, 2.0);

        let s = scorer.breakdown(&b, &a);
        assert_eq!(s.duration, 0.0);
    }

    #[test]
    fn test_score_is_non_negative_and_asymmetric() {
        let scorer = TransitionScorer::default();
        let a = Track { energy: 0.02, mood: "warm".into(), ..track("a") };
        let b = Track { energy: 0.04, mood: "driving".into(), tempo: 135.0, ..track("b") };
        let ab = scorer.score(&a, &b);
        let ba = scorer.score(&b, &a);
        assert!(ab >= 0.0 && ba >= 0.0);
        assert_ne!(ab, ba);
    }
}
