//! Greedy sequence construction
//!
//! Two stages: pick an opening track by how well it suits the start of a
//! listening session, then repeatedly append whichever remaining track
//! follows the last placed one best. No backtracking; ties always go to the
//! track that came first in the input.

use super::scorer::TransitionScorer;
use super::track::Track;

/// Moods that make a good opening
const OPENING_MOODS: [&str; 5] = ["atmospheric", "calm", "dreamy", "mysterious", "melancholic"];
const OPENING_MOOD_BONUS: f32 = 10.0;

/// Characters that make a good opening
const OPENING_CHARACTERS: [&str; 3] = ["textural", "minimal", "lush"];
const OPENING_CHARACTER_BONUS: f32 = 4.0;

/// Keys perceived as open
const OPEN_KEYS: [&str; 7] = ["C", "Am", "G", "Em", "F", "Dm", "D"];
const OPEN_KEY_BONUS: f32 = 2.0;

/// Energy at or above which a track earns no low-energy points
const ENERGY_CEILING: f32 = 0.1;
const LOW_ENERGY_WEIGHT: f32 = 10.0;

/// Duration at or above which a track earns the full length points, in seconds
const DURATION_FULL: f32 = 300.0;
const DURATION_WEIGHT: f32 = 3.0;

const SLOW_TEMPO: f32 = 100.0;
const SLOW_TEMPO_BONUS: f32 = 2.0;

/// Greedy constructor over a transition scorer
#[derive(Debug, Clone, Copy)]
pub struct SequenceBuilder<'a> {
    scorer: TransitionScorer<'a>,
}

impl<'a> SequenceBuilder<'a> {
    /// Create a builder around a scorer
    pub fn new(scorer: TransitionScorer<'a>) -> Self {
        Self { scorer }
    }

    /// How well a track suits the opening slot
    ///
    /// Favours atmospheric moods, low energy, longer tracks, open keys and
    /// slow tempi.
    pub fn intro_suitability(&self, track: &Track) -> f32 {
        let is_one_of = |label: &str, list: &[&str]| {
            list.iter().any(|l| l.eq_ignore_ascii_case(label.trim()))
        };

        let mut score = 0.0;
        if is_one_of(&track.mood, &OPENING_MOODS[..]) {
            score += OPENING_MOOD_BONUS;
        }
        if is_one_of(&track.character, &OPENING_CHARACTERS[..]) {
            score += OPENING_CHARACTER_BONUS;
        }
        score += ((ENERGY_CEILING - track.energy) / ENERGY_CEILING).clamp(0.0, 1.0) * LOW_ENERGY_WEIGHT;
        score += (track.duration / DURATION_FULL).clamp(0.0, 1.0) * DURATION_WEIGHT;

        let model = self.scorer.model();
        if OPEN_KEYS.iter().any(|k| model.same_key(&track.key, k)) {
            score += OPEN_KEY_BONUS;
        }
        if track.tempo < SLOW_TEMPO {
            score += SLOW_TEMPO_BONUS;
        }
        score
    }

    /// Index of the best opening track, `None` for an empty collection
    ///
    /// A track whose suitability is not a number ranks below every other.
    pub fn select_intro(&self, tracks: &[Track]) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, track) in tracks.iter().enumerate() {
            let s = match self.intro_suitability(track) {
                s if s.is_nan() => f32::NEG_INFINITY,
                s => s,
            };
            if best.map_or(true, |(_, b)| s > b) {
                best = Some((i, s));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Build a full ordering as indices into `tracks`
    ///
    /// The result is a permutation of `0..tracks.len()`.
    pub fn build(&self, tracks: &[Track]) -> Vec<usize> {
        let Some(intro) = self.select_intro(tracks) else {
            return Vec::new();
        };

        log::debug!("Opening with '{}'", tracks[intro].filename);

        let mut order = Vec::with_capacity(tracks.len());
        let mut placed = vec![false; tracks.len()];
        order.push(intro);
        placed[intro] = true;

        while order.len() < tracks.len() {
            let last = &tracks[order[order.len() - 1]];
            let mut best: Option<(usize, f32)> = None;
            for (i, candidate) in tracks.iter().enumerate() {
                if placed[i] {
                    continue;
                }
                let s = self.scorer.score(last, candidate);
                if best.map_or(true, |(_, b)| s > b) {
                    best = Some((i, s));
                }
            }
            // Unreachable while unplaced tracks remain
            let Some((next, score)) = best else { break };
            log::debug!(
                "Position {}: '{}' after '{}' (score {:.1})",
                order.len() + 1,
                tracks[next].filename,
                last.filename,
                score
            );
            order.push(next);
            placed[next] = true;
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> SequenceBuilder<'static> {
        SequenceBuilder::new(TransitionScorer::default())
    }

    #[test]
    fn test_empty_and_single() {
        assert!(builder().build(&[]).is_empty());
        assert_eq!(builder().select_intro(&[]), None);
        assert_eq!(builder().build(&[Track::neutral("solo")]), vec![0]);
    }

    #[test]
    fn test_intro_prefers_atmospheric_low_energy() {
        let tracks = vec![
            Track { energy: 0.09, mood: "driving".into(), tempo: 128.0, ..Track::neutral("loud") },
            Track { energy: 0.01, mood: "atmospheric".into(), tempo: 70.0, ..Track::neutral("haze") },
            Track { energy: 0.04, mood: "warm".into(), ..Track::neutral("mid") },
        ];
        assert_eq!(builder().select_intro(&tracks), Some(1));
    }

    #[test]
    fn test_intro_ties_go_to_first() {
        let tracks = vec![Track::neutral("a"), Track::neutral("b"), Track::neutral("c")];
        assert_eq!(builder().select_intro(&tracks), Some(0));
    }

    #[test]
    fn test_nan_suitability_never_opens() {
        let tracks = vec![
            Track { energy: f32::NAN, mood: "aggressive".into(), tempo: 170.0, ..Track::neutral("nan") },
            Track { energy: 0.01, mood: "atmospheric".into(), tempo: 70.0, ..Track::neutral("haze") },
        ];
        assert!(builder().intro_suitability(&tracks[0]).is_nan());
        assert_eq!(builder().select_intro(&tracks), Some(1));
        // Still a candidate when nothing else is available
        assert_eq!(builder().select_intro(&tracks[..1]), Some(0));
    }

    #[test]
    fn test_build_is_permutation() {
        let tracks: Vec<Track> = (0..9)
            .map(|i| Track {
                energy: 0.01 * i as f32,
                tempo: 80.0 + 7.0 * i as f32,
                key: ["C", "G", "Am", "F#", "Dm"][i % 5].to_string(),
                ..Track::neutral(format!("t{}", i))
            })
            .collect();
        let mut order = builder().build(&tracks);
        assert_eq!(order.len(), tracks.len());
        order.sort_unstable();
        assert_eq!(order, (0..tracks.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_build_follows_best_transition() {
        let tracks = vec![
            Track { mood: "atmospheric".into(), energy: 0.01, key: "C".into(), ..Track::neutral("open") },
            Track { mood: "aggressive".into(), energy: 0.2, key: "F#".into(), tempo: 170.0, ..Track::neutral("far") },
            Track { mood: "calm".into(), energy: 0.02, key: "Am".into(), ..Track::neutral("near") },
        ];
        assert_eq!(builder().build(&tracks), vec![0, 2, 1]);
    }
}
