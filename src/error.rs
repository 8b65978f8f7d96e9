use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("PTM {ptm_id} requires {num_mods} modifications but only {available} positions are possible")]
    InvalidPtmSpec {
        ptm_id: i64,
        num_mods: usize,
        available: usize,
    },
    #[error("The {num_ptms} PTMs yield more hypothetical structures than can be enumerated")]
    TooManyHypotheticalStructures { num_ptms: usize },
    #[error("Unknown residue '{0}'")]
    UnknownResidue(char),
    #[error("Unsupported scoring method: {0}")]
    UnsupportedScoringMethod(String),
    #[error("Empty parent sequence")]
    EmptyParentSequence,
    #[error("PTM position {position} is outside of the parent sequence (length {length})")]
    PtmPositionOutOfRange { position: usize, length: usize },
    #[error("Hypothetical structure {hs_id} references PTM index {ptm_index} which is not in the catalog")]
    UnknownPtmIndex { hs_id: usize, ptm_index: usize },
    #[error("Invalid charge state: {0}")]
    InvalidCharge(usize),
    #[error("Invalid matching tolerance: {0}")]
    InvalidTolerance(f64),
    #[error("m/z ({0}) and {1} ({2}) arrays must have the same length")]
    ExperimentalSpectrumShape(usize, &'static str, usize),
    #[error("Peak at m/z {mz} (spectrum {spectrum_index}) has no abundance ceiling or background")]
    MissingWeightInputs { mz: f64, spectrum_index: usize },
    #[error("Number of spectra must be greater than zero")]
    NoSpectra,
    #[cfg(feature = "polars")]
    #[error("Cannot build data frame: {0}")]
    DataFrame(#[from] polars::error::PolarsError),
}
