//! Structural segmentation
//!
//! Splits a track's descriptor time series into labelled phases:
//! - Signal conditioning (smoothing, gradient)
//! - Peak picking over the change signal
//! - Change-point detection and phase aggregation
//! - Heuristic phase labelling
//! - Parallel batch runs across a collection

pub mod batch;
pub mod change_point;
pub mod classifier;
pub mod frame_series;
pub mod peak_picking;
pub mod smoothing;
