//! Flow sequencing
//!
//! Orders a collection of tracks for listening:
//! - Key model and static compatibility graphs
//! - Directional transition scoring
//! - Greedy construction from a chosen opener
//! - Adjacent-swap refinement strategies
//! - Per-position reasoning

pub mod builder;
pub mod compatibility;
pub mod explainer;
pub mod key;
pub mod optimizer;
pub mod scorer;
pub mod sequencer;
pub mod track;
