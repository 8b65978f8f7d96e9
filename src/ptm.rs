use serde::{Deserialize, Serialize};

/// A post-translational modification candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ptm {
    pub ptm_id: i64,
    /// 1-based positions along the parent sequence which may carry the modification.
    pub poss_mod_pos: Vec<usize>,
    /// Number of simultaneous modifications.
    pub num_mods: usize,
    /// Mass shift per modified residue (Da).
    pub m_shift: f64,
}

impl Ptm {
    pub fn new(ptm_id: i64, poss_mod_pos: Vec<usize>, num_mods: usize, m_shift: f64) -> Self {
        Self {
            ptm_id,
            poss_mod_pos,
            num_mods,
            m_shift,
        }
    }

    /// Possible positions, ascending and without duplicates.
    pub fn positions(&self) -> Vec<usize> {
        let mut positions = self.poss_mod_pos.clone();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}
