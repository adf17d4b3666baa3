// Revlens: automation bias analysis for Wikipedia edit histories.
//
// This is the library root. Each module corresponds to a major subsystem
// of the analysis pipeline.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod wiki;
