use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::Error, ptm::Ptm};

/// The positions chosen for one PTM of the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtmPlacement {
    /// 0-based index of the PTM within the catalog.
    pub ptm_index: usize,
    pub locations: Vec<usize>,
}

/// One combination of PTM placements, exactly one placement per catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypotheticalStructure {
    pub hs_id: usize,
    pub placements: Vec<PtmPlacement>,
}

/// Long-form row of the hypothetical structure relation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRow {
    pub hs_id: usize,
    pub ptm_index: usize,
    pub ptm_locations: Vec<usize>,
}

/// Lazy Cartesian product over the per-PTM position combinations.
/// The last PTM of the catalog varies fastest. Clone it to restart the enumeration.
#[derive(Clone, Debug)]
pub struct HypotheticalStructures {
    choices: Vec<Vec<Vec<usize>>>,
    counters: Vec<usize>,
    next_hs_id: usize,
    total: usize,
}

impl HypotheticalStructures {
    /// Number of hypothetical structures in the whole product, independent of iteration progress.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of position combinations available for each PTM, in catalog order.
    pub fn combinations_per_ptm(&self) -> Vec<usize> {
        self.choices.iter().map(Vec::len).collect()
    }
}

impl Iterator for HypotheticalStructures {
    type Item = HypotheticalStructure;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_hs_id >= self.total {
            return None;
        }

        let placements = self
            .counters
            .iter()
            .zip(self.choices.iter())
            .enumerate()
            .map(|(ptm_index, (&counter, combinations))| PtmPlacement {
                ptm_index,
                locations: combinations[counter].clone(),
            })
            .collect();

        let structure = HypotheticalStructure {
            hs_id: self.next_hs_id,
            placements,
        };
        self.next_hs_id += 1;

        for (counter, combinations) in self.counters.iter_mut().zip(self.choices.iter()).rev() {
            *counter += 1;
            if *counter < combinations.len() {
                break;
            }
            *counter = 0;
        }

        Some(structure)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next_hs_id;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HypotheticalStructures {}

/// Generates all hypothetical structures by marrying every position combination of every PTM.
///
/// # Arguments
/// * `catalog` - PTM candidates. Their order determines the enumeration order.
///
pub fn generate(catalog: &[Ptm]) -> Result<HypotheticalStructures, Error> {
    let choices = catalog
        .iter()
        .map(|ptm| {
            let positions = ptm.positions();
            if ptm.num_mods > positions.len() {
                return Err(Error::InvalidPtmSpec {
                    ptm_id: ptm.ptm_id,
                    num_mods: ptm.num_mods,
                    available: positions.len(),
                });
            }
            Ok(positions
                .into_iter()
                .combinations(ptm.num_mods)
                .collect::<Vec<Vec<usize>>>())
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let total = choices
        .iter()
        .try_fold(1usize, |total, combinations| total.checked_mul(combinations.len()))
        .ok_or(Error::TooManyHypotheticalStructures {
            num_ptms: catalog.len(),
        })?;
    debug!(
        "{} PTMs expand to {} hypothetical structures",
        catalog.len(),
        total
    );

    Ok(HypotheticalStructures {
        counters: vec![0; choices.len()],
        choices,
        next_hs_id: 0,
        total,
    })
}

/// Flattens hypothetical structures into one row per (structure, PTM) pair.
pub fn flatten<'a>(
    structures: impl IntoIterator<Item = &'a HypotheticalStructure>,
) -> Vec<PlacementRow> {
    structures
        .into_iter()
        .flat_map(|structure| {
            structure.placements.iter().map(|placement| PlacementRow {
                hs_id: structure.hs_id,
                ptm_index: placement.ptm_index,
                ptm_locations: placement.locations.clone(),
            })
        })
        .collect()
}
