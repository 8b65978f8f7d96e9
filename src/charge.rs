use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    fragment::{FragmentIon, IonName, IonType},
    matching::TheoreticalIon,
    utils::mass_to_mz,
};

/// Fragment ion in a given charge state. Charge 0 is the neutral (deconvoluted) mass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargedIon {
    pub fragment: FragmentIon,
    pub charge: usize,
    /// m/z for charged ions, the neutral mass for charge 0.
    pub mz: f64,
}

impl ChargedIon {
    pub fn neutral(fragment: FragmentIon) -> Self {
        Self {
            mz: fragment.mass,
            fragment,
            charge: 0,
        }
    }

    pub fn name(&self) -> IonName {
        self.fragment.name
    }

    /// Label for annotating a plotted spectrum, e.g. `$b_{4}^{+2}$` or `$p{}^{+1}$`.
    pub fn label(&self) -> String {
        let name = self.name();
        let mut label = match name.ion_type {
            IonType::Parent => format!("{}{{{}}}", name.ion_type, name.index_label()),
            IonType::B | IonType::Y => format!("{}_{{{}}}", name.ion_type, name.index_label()),
        };
        if self.charge > 0 {
            label.push_str(&format!("^{{+{}}}", self.charge));
        }
        format!("${label}$")
    }
}

impl TheoreticalIon for ChargedIon {
    fn hs_id(&self) -> usize {
        self.fragment.hs_id
    }

    fn theoretical_mz(&self) -> f64 {
        self.mz
    }
}

/// Makes charged versions of fragment ions.
///
/// All neutral ions come first, followed by one block per entry of `charges`, in the given order.
///
/// # Arguments
/// * `fragments` - Neutral fragment ions.
/// * `charges` - Charge states to add. The neutral state is always included and must not be listed.
/// * `proton_mass` - Mass of a proton.
///
pub fn add_charges(
    fragments: &[FragmentIon],
    charges: &[usize],
    proton_mass: f64,
) -> Result<Vec<ChargedIon>, Error> {
    if charges.contains(&0) {
        return Err(Error::InvalidCharge(0));
    }

    let mut charged = Vec::with_capacity(fragments.len() * (charges.len() + 1));
    charged.extend(fragments.iter().cloned().map(ChargedIon::neutral));
    for &charge in charges {
        charged.extend(fragments.iter().map(|fragment| ChargedIon {
            fragment: fragment.clone(),
            charge,
            mz: mass_to_mz(fragment.mass, charge, proton_mass),
        }));
    }

    debug!(
        "{} fragment ions expanded to {} charged ions",
        fragments.len(),
        charged.len()
    );

    Ok(charged)
}
