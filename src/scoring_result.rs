use serde::{Deserialize, Serialize};

use crate::scoring::ScoringMethod;

/// Score of one hypothetical structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureScore {
    pub hs_id: usize,
    pub score: f64,
    pub score_method: ScoringMethod,
    /// Number of theoretical ions of the structure.
    pub ions_total: usize,
    /// Number of matched (ion, peak) rows, may exceed `ions_total`.
    pub ions_matched: usize,
}
