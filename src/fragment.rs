use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    amino_acid::residue_masses,
    error::Error,
    hypothetical_structure::HypotheticalStructure,
    matching::TheoreticalIon,
    ptm::Ptm,
};

/// Which part of the parent a fragment retains.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IonType {
    /// Prefix, N-terminal residues retained.
    #[serde(rename = "b")]
    B,
    /// Suffix, C-terminal residues retained.
    #[serde(rename = "y")]
    Y,
    /// The whole sequence.
    #[serde(rename = "p")]
    Parent,
}

impl fmt::Display for IonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IonType::B => write!(f, "b"),
            IonType::Y => write!(f, "y"),
            IonType::Parent => write!(f, "p"),
        }
    }
}

/// Structured identity of a fragment ion. `length` is the number of residues;
/// it is not part of the rendered name for parent ions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IonName {
    pub ion_type: IonType,
    pub length: usize,
}

impl IonName {
    pub fn new(ion_type: IonType, length: usize) -> Self {
        Self { ion_type, length }
    }

    /// Index rendered after the ion type, empty for parent ions.
    pub fn index_label(&self) -> String {
        match self.ion_type {
            IonType::Parent => String::new(),
            IonType::B | IonType::Y => self.length.to_string(),
        }
    }
}

impl fmt::Display for IonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.ion_type, self.index_label())
    }
}

/// Peptide to fragment together with its terminal modification mass shifts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParentSequence {
    pub sequence: String,
    pub n_term_mod: f64,
    pub c_term_mod: f64,
}

impl ParentSequence {
    pub fn new(sequence: impl Into<String>, n_term_mod: f64, c_term_mod: f64) -> Self {
        Self {
            sequence: sequence.into(),
            n_term_mod,
            c_term_mod,
        }
    }
}

/// Neutral fragment of one hypothetical structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FragmentIon {
    pub hs_id: usize,
    pub seq: String,
    pub mass: f64,
    pub name: IonName,
}

impl FragmentIon {
    pub fn ion_type(&self) -> IonType {
        self.name.ion_type
    }
}

impl TheoreticalIon for FragmentIon {
    fn hs_id(&self) -> usize {
        self.hs_id
    }

    fn theoretical_mz(&self) -> f64 {
        self.mass
    }
}

/// PTM mass shifts of one structure: the shift and the chosen 1-based positions.
type PlacedShifts<'a> = Vec<(f64, &'a [usize])>;

/// Sums the PTM shifts whose positions fall in `(lower, upper]`.
/// A PTM counts once per chosen position inside the window.
fn ptm_shift(shifts: &[(f64, &[usize])], lower: usize, upper: usize) -> f64 {
    shifts.iter().fold(0.0, |mass, (shift, locations)| {
        let included = locations
            .iter()
            .filter(|&&location| location > lower && location <= upper)
            .count();
        mass + shift * included as f64
    })
}

fn placed_shifts<'a>(
    structure: &'a HypotheticalStructure,
    catalog: &[Ptm],
    length: usize,
) -> Result<PlacedShifts<'a>, Error> {
    structure
        .placements
        .iter()
        .map(|placement| {
            let ptm = catalog
                .get(placement.ptm_index)
                .ok_or(Error::UnknownPtmIndex {
                    hs_id: structure.hs_id,
                    ptm_index: placement.ptm_index,
                })?;
            if let Some(&position) = placement
                .locations
                .iter()
                .find(|&&position| position == 0 || position > length)
            {
                return Err(Error::PtmPositionOutOfRange { position, length });
            }
            Ok((ptm.m_shift, placement.locations.as_slice()))
        })
        .collect()
}

/// Truncates the parent from both termini for a single hypothetical structure.
/// Emits the b-series (lengths 1..L-1) followed by the suffix series (lengths L..1, parent first).
fn fragment_structure(
    structure: &HypotheticalStructure,
    catalog: &[Ptm],
    parent: &ParentSequence,
    residues: &[f64],
) -> Result<Vec<FragmentIon>, Error> {
    let length = residues.len();
    let shifts = placed_shifts(structure, catalog, length)?;
    let mut ions = Vec::with_capacity(2 * length - 1);

    for ion_len in 1..length {
        let residue_mass: f64 = residues[..ion_len].iter().sum();
        let mass = residue_mass + parent.n_term_mod + ptm_shift(&shifts, 1, ion_len);
        ions.push(FragmentIon {
            hs_id: structure.hs_id,
            seq: parent.sequence[..ion_len].to_string(),
            mass,
            name: IonName::new(IonType::B, ion_len),
        });
    }

    for start in 0..length {
        let ion_len = length - start;
        let residue_mass: f64 = residues[start..].iter().sum();
        let (term_mod, ion_type) = if ion_len == length {
            (parent.n_term_mod + parent.c_term_mod, IonType::Parent)
        } else {
            (parent.c_term_mod, IonType::Y)
        };
        let mass = residue_mass + term_mod + ptm_shift(&shifts, length - ion_len, ion_len);
        ions.push(FragmentIon {
            hs_id: structure.hs_id,
            seq: parent.sequence[start..].to_string(),
            mass,
            name: IonName::new(ion_type, ion_len),
        });
    }

    Ok(ions)
}

/// Fragments the parent sequence for each hypothetical structure from the N- and C-terminus.
///
/// # Arguments
/// * `structures` - Hypothetical structures, usually from [`crate::hypothetical_structure::generate`].
/// * `catalog` - PTM catalog the structures' placements index into.
/// * `parent` - Untruncated sequence and terminal modifications.
///
pub fn fragment(
    structures: &[HypotheticalStructure],
    catalog: &[Ptm],
    parent: &ParentSequence,
) -> Result<Vec<FragmentIon>, Error> {
    let residues = residue_masses(&parent.sequence)?;
    if residues.is_empty() {
        return Err(Error::EmptyParentSequence);
    }

    let fragments = structures
        .par_iter()
        .map(|structure| fragment_structure(structure, catalog, parent, &residues))
        .collect::<Result<Vec<Vec<FragmentIon>>, Error>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<FragmentIon>>();

    debug!(
        "{} fragment ions for {} hypothetical structures of {}",
        fragments.len(),
        structures.len(),
        parent.sequence
    );

    Ok(fragments)
}
