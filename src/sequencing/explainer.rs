//! Human-readable reasoning for sequence positions

use serde::{Deserialize, Serialize};

use super::track::Track;

/// Where in the sequence a position falls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceStage {
    /// The only track: opens and closes at once
    OpeningAndClosing,
    /// First position
    Opening,
    /// First stretch after the opener
    Early,
    /// Middle of the sequence
    Core,
    /// Stretch before the closer
    Late,
    /// Last position
    Closing,
}

const EARLY_UNTIL: f32 = 0.4;
const CORE_UNTIL: f32 = 0.75;

impl SequenceStage {
    /// Stage of a 1-based position in a sequence of `total` tracks
    pub fn of(position: usize, total: usize) -> Self {
        if total <= 1 {
            return SequenceStage::OpeningAndClosing;
        }
        if position <= 1 {
            return SequenceStage::Opening;
        }
        if position >= total {
            return SequenceStage::Closing;
        }
        let fraction = (position - 1) as f32 / (total - 1) as f32;
        if fraction < EARLY_UNTIL {
            SequenceStage::Early
        } else if fraction < CORE_UNTIL {
            SequenceStage::Core
        } else {
            SequenceStage::Late
        }
    }
}

/// One sentence on why `track` sits at `position` (1-based) of `total`
pub fn explain(track: &Track, position: usize, total: usize) -> String {
    let mood = track.mood.trim();
    let character = track.character.trim();
    let tempo = track.tempo;

    match SequenceStage::of(position, total) {
        SequenceStage::OpeningAndClosing => format!(
            "Opening and closing track: a {} piece with {} character at {:.0} BPM stands on its own.",
            mood, character, tempo
        ),
        SequenceStage::Opening => format!(
            "Opening track: {} mood and {} character set the tone at {:.0} BPM.",
            mood, character, tempo
        ),
        SequenceStage::Early => format!(
            "Early in the journey: {} {} material at {:.0} BPM develops the opening atmosphere.",
            mood, character, tempo
        ),
        SequenceStage::Core => format!(
            "Core of the sequence: {} energy with {} character carries the flow at {:.0} BPM.",
            mood, character, tempo
        ),
        SequenceStage::Late => format!(
            "Late stage: {} {} textures at {:.0} BPM begin the descent.",
            mood, character, tempo
        ),
        SequenceStage::Closing => format!(
            "Closing track: {} mood and {} character bring the journey to rest at {:.0} BPM.",
            mood, character, tempo
        ),
    }
}
