//! Musical keys and their harmonic neighbourhood

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Musical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Major key (0 = C, 1 = C#, ..., 11 = B)
    Major(u32),
    /// Minor key (0 = C, 1 = C#, ..., 11 = B)
    Minor(u32),
}

impl Key {
    /// All 24 keys, majors first
    pub fn all() -> impl Iterator<Item = Key> {
        (0..12).map(Key::Major).chain((0..12).map(Key::Minor))
    }

    /// Pitch class of the tonic (0-11)
    pub fn tonic(&self) -> u32 {
        match self {
            Key::Major(i) | Key::Minor(i) => i % 12,
        }
    }

    /// Get key name in musical notation (e.g., "C", "Am", "F#", "D#m")
    ///
    /// # Example
    ///
    /// ```
    /// use synthflow::sequencing::key::Key;
    ///
    /// assert_eq!(Key::Major(0).name(), "C");
    /// assert_eq!(Key::Minor(9).name(), "Am");
    /// ```
    pub fn name(&self) -> String {
        match self {
            Key::Major(_) => NOTE_NAMES[self.tonic() as usize].to_string(),
            Key::Minor(_) => format!("{}m", NOTE_NAMES[self.tonic() as usize]),
        }
    }

    /// Camelot wheel notation (e.g., "8B" for C major, "8A" for A minor)
    ///
    /// # Example
    ///
    /// ```
    /// use synthflow::sequencing::key::Key;
    ///
    /// assert_eq!(Key::Major(0).camelot(), "8B");
    /// assert_eq!(Key::Minor(9).camelot(), "8A");
    /// assert_eq!(Key::Major(7).camelot(), "9B");
    /// ```
    pub fn camelot(&self) -> String {
        // Minor keys share the number of their relative major
        let (major_tonic, letter) = match self {
            Key::Major(_) => (self.tonic(), 'B'),
            Key::Minor(_) => ((self.tonic() + 3) % 12, 'A'),
        };
        let fifths = (major_tonic * 7) % 12;
        format!("{}{}", (fifths + 7) % 12 + 1, letter)
    }

    /// Parse Camelot notation ("1A"-"12B")
    pub fn from_camelot(notation: &str) -> Option<Self> {
        let notation = notation.trim();
        if notation.len() < 2 || !notation.is_ascii() {
            return None;
        }
        let (num_str, letter) = notation.split_at(notation.len() - 1);
        let num: u32 = num_str.parse().ok()?;
        if !(1..=12).contains(&num) {
            return None;
        }
        // Inverse of the fifths mapping in `camelot`
        let fifths = (num + 4) % 12;
        let major_tonic = (fifths * 7) % 12;
        match letter {
            "B" | "b" => Some(Key::Major(major_tonic)),
            "A" | "a" => Some(Key::Minor((major_tonic + 9) % 12)),
            _ => None,
        }
    }

    /// Relative key (C ↔ Am)
    pub fn relative(&self) -> Key {
        match self {
            Key::Major(_) => Key::Minor((self.tonic() + 9) % 12),
            Key::Minor(_) => Key::Major((self.tonic() + 3) % 12),
        }
    }

    /// Parallel key (C ↔ Cm)
    pub fn parallel(&self) -> Key {
        match self {
            Key::Major(_) => Key::Minor(self.tonic()),
            Key::Minor(_) => Key::Major(self.tonic()),
        }
    }

    /// Circle-of-fifths neighbours: dominant, subdominant, relative, parallel
    pub fn harmonic_neighbors(&self) -> [Key; 4] {
        let up = (self.tonic() + 7) % 12;
        let down = (self.tonic() + 5) % 12;
        let (dominant, subdominant) = match self {
            Key::Major(_) => (Key::Major(up), Key::Major(down)),
            Key::Minor(_) => (Key::Minor(up), Key::Minor(down)),
        };
        [dominant, subdominant, self.relative(), self.parallel()]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Key {
    type Err = AnalysisError;

    /// Parse "C", "c#", "Db", "Am", "F# minor", "Bb major", "Ebmin" or Camelot "8A"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnalysisError::InvalidInput(format!("Unrecognized key '{}'", s));
        let trimmed = s.trim();

        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            return Key::from_camelot(trimmed).ok_or_else(invalid);
        }

        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let natural: i32 = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let (shift, rest) = if let Some(r) = rest.strip_prefix('#').or_else(|| rest.strip_prefix('♯')) {
            (1, r)
        } else if let Some(r) = rest.strip_prefix('b').or_else(|| rest.strip_prefix('♭')) {
            (-1, r)
        } else {
            (0, rest)
        };
        let tonic = (natural + shift).rem_euclid(12) as u32;

        match rest.trim().to_ascii_lowercase().as_str() {
            "" | "maj" | "major" => Ok(Key::Major(tonic)),
            "m" | "min" | "minor" => Ok(Key::Minor(tonic)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name() {
        assert_eq!(Key::Major(6).name(), "F#");
        assert_eq!(Key::Minor(1).name(), "C#m");
        assert_eq!(Key::Minor(11).to_string(), "Bm");
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!("C".parse::<Key>().unwrap(), Key::Major(0));
        assert_eq!("c#".parse::<Key>().unwrap(), Key::Major(1));
        assert_eq!("Db".parse::<Key>().unwrap(), Key::Major(1));
        assert_eq!("Am".parse::<Key>().unwrap(), Key::Minor(9));
        assert_eq!("bm".parse::<Key>().unwrap(), Key::Minor(11));
        assert_eq!("Bbm".parse::<Key>().unwrap(), Key::Minor(10));
        assert_eq!("F# minor".parse::<Key>().unwrap(), Key::Minor(6));
        assert_eq!("Bb major".parse::<Key>().unwrap(), Key::Major(10));
        assert_eq!("Ebmin".parse::<Key>().unwrap(), Key::Minor(3));
        assert_eq!("Cb".parse::<Key>().unwrap(), Key::Major(11));
        assert_eq!("8A".parse::<Key>().unwrap(), Key::Minor(9));
        assert!("H".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
        assert!("C dorian".parse::<Key>().is_err());
    }

    #[test]
    fn test_camelot_major() {
        assert_eq!(Key::Major(0).camelot(), "8B"); // C
        assert_eq!(Key::Major(7).camelot(), "9B"); // G
        assert_eq!(Key::Major(5).camelot(), "7B"); // F
        assert_eq!(Key::Major(11).camelot(), "1B"); // B
    }

    #[test]
    fn test_camelot_minor() {
        assert_eq!(Key::Minor(9).camelot(), "8A"); // Am
        assert_eq!(Key::Minor(4).camelot(), "9A"); // Em
        assert_eq!(Key::Minor(8).camelot(), "1A"); // G#m
        assert_eq!(Key::Minor(2).camelot(), "7A"); // Dm
    }

    #[test]
    fn test_camelot_inverse() {
        for key in Key::all() {
            assert_eq!(Key::from_camelot(&key.camelot()), Some(key), "{}", key);
        }
        assert_eq!(Key::from_camelot("0A"), None);
        assert_eq!(Key::from_camelot("13B"), None);
        assert_eq!(Key::from_camelot("5C"), None);
    }

    #[test]
    fn test_neighbors() {
        let c = Key::Major(0);
        let n = c.harmonic_neighbors();
        assert_eq!(n, [Key::Major(7), Key::Major(5), Key::Minor(9), Key::Minor(0)]);

        let am = Key::Minor(9);
        let n = am.harmonic_neighbors();
        assert_eq!(n, [Key::Minor(4), Key::Minor(2), Key::Major(0), Key::Major(9)]);
    }
}
