//! Static compatibility knowledge
//!
//! Three directed adjacency maps: harmonic key relations, mood relations
//! and character relations. A relation `a → b` says that moving *from* `a`
//! *to* `b` works well; it says nothing about `b → a`. The mood table is
//! deliberately asymmetric (e.g. warm material can lift into driving
//! material, but driving material does not settle back into warm).

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::key::Key;

/// Mood adjacency: mood → moods it transitions well into
pub static MOOD_RELATIONS: &[(&str, &[&str])] = &[
    ("atmospheric", &["calm", "dreamy", "mysterious", "warm"]),
    ("calm", &["atmospheric", "warm", "dreamy", "melancholic"]),
    ("warm", &["calm", "dreamy", "hypnotic", "driving", "euphoric"]),
    ("dreamy", &["atmospheric", "warm", "euphoric", "melancholic"]),
    ("melancholic", &["calm", "dark", "dreamy", "mysterious"]),
    ("mysterious", &["atmospheric", "dark", "hypnotic", "tense"]),
    ("dark", &["mysterious", "tense", "hypnotic", "aggressive"]),
    ("hypnotic", &["driving", "dark", "mysterious", "warm"]),
    ("driving", &["energetic", "hypnotic", "euphoric", "tense"]),
    ("energetic", &["driving", "euphoric", "aggressive"]),
    ("tense", &["dark", "aggressive", "driving"]),
    ("euphoric", &["energetic", "warm", "dreamy"]),
    ("aggressive", &["tense", "energetic", "dark"]),
    ("neutral", &["calm", "warm", "driving"]),
];

/// Character adjacency: character → characters it transitions well into
pub static CHARACTER_RELATIONS: &[(&str, &[&str])] = &[
    ("textural", &["minimal", "lush", "crystalline"]),
    ("minimal", &["textural", "pulsing", "melodic"]),
    ("lush", &["melodic", "textural", "crystalline"]),
    ("melodic", &["lush", "crystalline", "pulsing"]),
    ("crystalline", &["melodic", "lush"]),
    ("pulsing", &["percussive", "minimal", "melodic"]),
    ("percussive", &["pulsing", "gritty"]),
    ("gritty", &["percussive", "pulsing"]),
];

static GLOBAL: Lazy<CompatibilityModel> = Lazy::new(CompatibilityModel::new);

/// Directed compatibility graphs for keys, moods and characters
#[derive(Debug, Clone)]
pub struct CompatibilityModel {
    keys: HashMap<Key, HashSet<Key>>,
    moods: HashMap<String, HashSet<String>>,
    characters: HashMap<String, HashSet<String>>,
}

fn label_graph(table: &[(&str, &[&str])]) -> HashMap<String, HashSet<String>> {
    table
        .iter()
        .map(|(from, to)| (normalize(from), to.iter().map(|t| normalize(t)).collect()))
        .collect()
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

impl CompatibilityModel {
    /// Build the stock tables
    ///
    /// Keys relate to their circle-of-fifths neighbours (dominant and
    /// subdominant) and to their relative and parallel keys.
    pub fn new() -> Self {
        let keys = Key::all()
            .map(|k| (k, k.harmonic_neighbors().into_iter().collect()))
            .collect();

        Self {
            keys,
            moods: label_graph(MOOD_RELATIONS),
            characters: label_graph(CHARACTER_RELATIONS),
        }
    }

    /// Process-wide shared instance, built on first use
    pub fn global() -> &'static CompatibilityModel {
        &GLOBAL
    }

    /// Add a directed key relation
    pub fn with_key_relation(mut self, from: Key, to: Key) -> Self {
        self.keys.entry(from).or_default().insert(to);
        self
    }

    /// Add a directed mood relation
    pub fn with_mood_relation(mut self, from: &str, to: &str) -> Self {
        self.moods.entry(normalize(from)).or_default().insert(normalize(to));
        self
    }

    /// Whether two key spellings name the same key
    ///
    /// Unparseable spellings are compared as case-insensitive text.
    pub fn same_key(&self, a: &str, b: &str) -> bool {
        match (a.parse::<Key>(), b.parse::<Key>()) {
            (Ok(ka), Ok(kb)) => ka == kb,
            _ => normalize(a) == normalize(b),
        }
    }

    /// Whether `to` is a harmonic neighbour of `from`
    pub fn keys_related(&self, from: &str, to: &str) -> bool {
        match (from.parse::<Key>(), to.parse::<Key>()) {
            (Ok(a), Ok(b)) => self.keys.get(&a).is_some_and(|n| n.contains(&b)),
            _ => false,
        }
    }

    /// Harmonic neighbours of a key
    pub fn related_keys(&self, key: &Key) -> Vec<Key> {
        let mut out: Vec<Key> = self
            .keys
            .get(key)
            .map(|n| n.iter().copied().collect())
            .unwrap_or_default();
        out.sort_by_key(|k| (matches!(k, Key::Minor(_)), k.tonic()));
        out
    }

    /// Whether moving from mood `from` into mood `to` is a known good transition
    pub fn moods_related(&self, from: &str, to: &str) -> bool {
        Self::related(&self.moods, from, to)
    }

    /// Whether moving from character `from` into character `to` is a known good transition
    pub fn characters_related(&self, from: &str, to: &str) -> bool {
        Self::related(&self.characters, from, to)
    }

    fn related(graph: &HashMap<String, HashSet<String>>, from: &str, to: &str) -> bool {
        graph
            .get(&normalize(from))
            .is_some_and(|n| n.contains(&normalize(to)))
    }
}

impl Default for CompatibilityModel {
    fn default() -> Self {
        Self::new()
    }
}
