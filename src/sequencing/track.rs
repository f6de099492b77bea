//! Track-level descriptor records
//!
//! A [`TrackDescriptor`] is what the feature extractor and mood classifier
//! hand over, with every field optional. A [`Track`] is the resolved form the
//! sequencer works on: missing fields are replaced by neutral defaults and
//! each replacement is logged as a warning.

use serde::{Deserialize, Serialize};

use crate::analysis::characterize::Characterization;
use crate::error::AnalysisError;

/// Tempo assumed when none was detected, in BPM
pub const DEFAULT_TEMPO: f32 = 120.0;
/// Key assumed when none was detected
pub const DEFAULT_KEY: &str = "C";
/// Mood assumed when none was assigned
pub const DEFAULT_MOOD: &str = "neutral";
/// Character assumed when none was assigned
pub const DEFAULT_CHARACTER: &str = "neutral";
/// RMS energy assumed when none was measured
pub const DEFAULT_ENERGY: f32 = 0.05;
/// Spectral centroid assumed when none was measured, in Hz
pub const DEFAULT_BRIGHTNESS: f32 = 2000.0;

/// Fully resolved track record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// File name, used for identification and logging
    pub filename: String,
    /// Duration in seconds
    pub duration: f32,
    /// Tempo in BPM
    pub tempo: f32,
    /// Key spelling (e.g. "C", "Am", "8A")
    pub key: String,
    /// Primary mood label
    pub mood: String,
    /// Primary character label
    pub character: String,
    /// Mean RMS energy
    pub energy: f32,
    /// Mean spectral centroid, in Hz
    pub brightness: f32,
    /// Similarity cluster, if clustering ran
    pub cluster_id: Option<u32>,
    /// Key detection confidence (0.0-1.0)
    pub key_confidence: f32,
}

/// Track record as supplied by external analysis, fields possibly missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackDescriptor {
    /// File name
    pub filename: String,
    /// Duration in seconds
    pub duration: Option<f32>,
    /// Tempo in BPM
    pub tempo: Option<f32>,
    /// Key spelling
    pub key: Option<String>,
    /// Primary mood label
    pub mood: Option<String>,
    /// Primary character label
    pub character: Option<String>,
    /// Mean RMS energy
    pub energy: Option<f32>,
    /// Mean spectral centroid, in Hz
    pub brightness: Option<f32>,
    /// Similarity cluster
    pub cluster_id: Option<u32>,
    /// Key detection confidence
    pub key_confidence: Option<f32>,
}

impl TrackDescriptor {
    /// Descriptor with only a filename
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Fill absent mood and character from a classifier's output
    ///
    /// Labels already present are kept.
    pub fn apply_characterization(&mut self, characterization: &Characterization) {
        if self.mood.is_none() {
            self.mood = characterization.primary_mood().map(str::to_string);
        }
        if self.character.is_none() {
            self.character = characterization.primary_character().map(str::to_string);
        }
    }

    /// Fields that are absent or unusable, as `MissingDescriptor` errors
    pub fn missing_descriptors(&self) -> Vec<AnalysisError> {
        let usable = |v: Option<f32>| v.is_some_and(|x| x.is_finite() && x >= 0.0);
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        [
            ("duration", usable(self.duration)),
            ("tempo", usable(self.tempo) && self.tempo.is_some_and(|t| t > 0.0)),
            ("key", present(&self.key)),
            ("mood", present(&self.mood)),
            ("character", present(&self.character)),
            ("energy", usable(self.energy)),
            ("brightness", usable(self.brightness)),
            ("key_confidence", usable(self.key_confidence)),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(field, _)| AnalysisError::MissingDescriptor {
            track: self.filename.clone(),
            field,
        })
        .collect()
    }
}

impl Track {
    /// Track with every descriptor at its neutral default
    pub fn neutral(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            duration: 0.0,
            tempo: DEFAULT_TEMPO,
            key: DEFAULT_KEY.to_string(),
            mood: DEFAULT_MOOD.to_string(),
            character: DEFAULT_CHARACTER.to_string(),
            energy: DEFAULT_ENERGY,
            brightness: DEFAULT_BRIGHTNESS,
            cluster_id: None,
            key_confidence: 0.0,
        }
    }

    /// Copy with unusable values replaced by neutral defaults
    ///
    /// Non-finite or negative numbers, a non-positive tempo and blank labels
    /// are treated like missing fields, each logged as a warning.
    pub fn resolved(&self) -> Track {
        Track::from_descriptor(TrackDescriptor::from(self))
    }

    /// Resolve a descriptor, defaulting and logging every missing field
    pub fn from_descriptor(descriptor: TrackDescriptor) -> Self {
        let missing = descriptor.missing_descriptors();
        for warning in &missing {
            log::warn!("{}, using default", warning);
        }
        let is_missing = |name: &str| {
            missing
                .iter()
                .any(|e| matches!(e, AnalysisError::MissingDescriptor { field, .. } if *field == name))
        };

        let neutral = Track::neutral(descriptor.filename.clone());
        Track {
            duration: pick(is_missing("duration"), descriptor.duration, neutral.duration),
            tempo: pick(is_missing("tempo"), descriptor.tempo, neutral.tempo),
            key: pick(is_missing("key"), descriptor.key, neutral.key),
            mood: pick(is_missing("mood"), descriptor.mood, neutral.mood),
            character: pick(is_missing("character"), descriptor.character, neutral.character),
            energy: pick(is_missing("energy"), descriptor.energy, neutral.energy),
            brightness: pick(is_missing("brightness"), descriptor.brightness, neutral.brightness),
            key_confidence: pick(
                is_missing("key_confidence"),
                descriptor.key_confidence,
                neutral.key_confidence,
            ),
            cluster_id: descriptor.cluster_id,
            filename: descriptor.filename,
        }
    }
}

fn pick<T>(missing: bool, value: Option<T>, default: T) -> T {
    match value {
        Some(v) if !missing => v,
        _ => default,
    }
}

impl From<&Track> for TrackDescriptor {
    fn from(track: &Track) -> Self {
        TrackDescriptor {
            filename: track.filename.clone(),
            duration: Some(track.duration),
            tempo: Some(track.tempo),
            key: Some(track.key.clone()),
            mood: Some(track.mood.clone()),
            character: Some(track.character.clone()),
            energy: Some(track.energy),
            brightness: Some(track.brightness),
            cluster_id: track.cluster_id,
            key_confidence: Some(track.key_confidence),
        }
    }
}

impl From<TrackDescriptor> for Track {
    fn from(descriptor: TrackDescriptor) -> Self {
        Track::from_descriptor(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> TrackDescriptor {
        TrackDescriptor {
            filename: "modular_dawn.flac".to_string(),
            duration: Some(240.0),
            tempo: Some(96.0),
            key: Some("Am".to_string()),
            mood: Some("dreamy".to_string()),
            character: Some("lush".to_string()),
            energy: Some(0.03),
            brightness: Some(1800.0),
            cluster_id: Some(2),
            key_confidence: Some(0.8),
        }
    }

    #[test]
    fn test_complete_descriptor_resolves_verbatim() {
        let d = complete();
        assert!(d.missing_descriptors().is_empty());
        let t = Track::from_descriptor(d);
        assert_eq!(t.tempo, 96.0);
        assert_eq!(t.key, "Am");
        assert_eq!(t.mood, "dreamy");
        assert_eq!(t.cluster_id, Some(2));
    }

    #[test]
    fn test_missing_fields_default() {
        let d = TrackDescriptor::new("bare.wav");
        let missing = d.missing_descriptors();
        assert_eq!(missing.len(), 8);

        let t: Track = d.into();
        assert_eq!(t, Track::neutral("bare.wav"));
        assert_eq!(t.tempo, 120.0);
        assert_eq!(t.key, "C");
        assert_eq!(t.mood, "neutral");
    }

    #[test]
    fn test_unusable_values_count_as_missing() {
        let d = TrackDescriptor {
            tempo: Some(0.0),
            energy: Some(f32::NAN),
            key: Some("  ".to_string()),
            ..complete()
        };
        let fields: Vec<&str> = d
            .missing_descriptors()
            .into_iter()
            .filter_map(|e| match e {
                AnalysisError::MissingDescriptor { field, .. } => Some(field),
                _ => None,
            })
            .collect();
        assert_eq!(fields, vec!["tempo", "key", "energy"]);

        let t = Track::from_descriptor(d);
        assert_eq!(t.tempo, DEFAULT_TEMPO);
        assert_eq!(t.energy, DEFAULT_ENERGY);
        assert_eq!(t.key, DEFAULT_KEY);
        assert_eq!(t.mood, "dreamy");
    }

    #[test]
    fn test_resolved_track_replaces_unusable_values() {
        let t = Track {
            energy: f32::NAN,
            tempo: -5.0,
            brightness: f32::INFINITY,
            mood: "aggressive".to_string(),
            cluster_id: Some(4),
            ..Track::neutral("broken.wav")
        };
        let r = t.resolved();
        assert_eq!(r.energy, DEFAULT_ENERGY);
        assert_eq!(r.tempo, DEFAULT_TEMPO);
        assert_eq!(r.brightness, DEFAULT_BRIGHTNESS);
        assert_eq!(r.mood, "aggressive");
        assert_eq!(r.cluster_id, Some(4));

        let sound = Track::neutral("fine.wav");
        assert_eq!(sound.resolved(), sound);
    }

    #[test]
    fn test_apply_characterization_keeps_existing_labels() {
        let c = Characterization {
            moods: vec!["atmospheric".to_string()],
            characters: vec!["textural".to_string()],
            ..Characterization::default()
        };
        let mut d = TrackDescriptor {
            mood: Some("warm".to_string()),
            ..TrackDescriptor::new("x.wav")
        };
        d.apply_characterization(&c);
        assert_eq!(d.mood.as_deref(), Some("warm"));
        assert_eq!(d.character.as_deref(), Some("textural"));
    }

    #[test]
    fn test_descriptor_from_partial_json() {
        let d: TrackDescriptor =
            serde_json::from_str(r#"{"filename": "a.wav", "tempo": 128.0, "key": "G"}"#).unwrap();
        assert_eq!(d.tempo, Some(128.0));
        assert_eq!(d.mood, None);
    }
}
