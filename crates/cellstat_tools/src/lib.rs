//! Figure generation for cellstat report tables.
//!
//! Each binary reads CSV tables produced by the analysis pipeline, reduces
//! them with [`surrounded`] or [`channel_duration`], and renders an SVG with
//! [`chart`].

pub mod channel_duration;
pub mod chart;
pub mod surrounded;
