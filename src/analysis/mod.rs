//! Segmentation results and their characterization
//!
//! - Phase and batch result types
//! - Mood/character labelling contract and the default range-table labeller

pub mod characterize;
pub mod result;
