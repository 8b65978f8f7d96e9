pub mod amino_acid;
/// Runs the whole pipeline for one parent sequence
pub mod annotator;
pub mod charge;
pub mod configuration;
pub mod error;
#[cfg(feature = "polars")]
pub mod frame;
pub mod fragment;
pub mod hypothetical_structure;
/// Tolerance based peak matching
pub mod matching;
pub mod ptm;
pub mod scoring;
pub mod scoring_result;
pub mod spectrum;
// Various utilities
pub mod utils;
