/// Converts a neutral mass (Dalton) to its mass to charge ratio (Thompson).
///
/// # Arguments
/// * `mass` - Neutral mass
/// * `charge` - Charge, must be greater than zero
/// * `proton_mass` - Mass of the charge carrier
///
pub fn mass_to_mz(mass: f64, charge: usize, proton_mass: f64) -> f64 {
    let charge = charge as f64;
    (mass + charge * proton_mass) / charge
}

/// Converts mass to charge ratio (Thompson) back to a neutral mass (Dalton).
///
/// # Arguments
/// * `mz` - Mass to charge ratio (Thompson)
/// * `charge` - Charge
/// * `proton_mass` - Mass of the charge carrier
///
pub fn mz_to_mass(mz: f64, charge: usize, proton_mass: f64) -> f64 {
    let charge = charge as f64;
    mz * charge - proton_mass * charge
}

#[cfg(test)]
pub mod tests {
    use ndarray::Array1;

    use super::*;
    use crate::{fragment::ParentSequence, spectrum::ObservedSpectra};

    #[test]
    fn test_mass_to_mz() {
        assert_eq!(mass_to_mz(246.0883, 1, 1.0078), 246.0883 + 1.0078);
        assert!((mass_to_mz(1391.640912490542, 3, 1.007276) - 464.887580163514).abs() < 1e-9);
    }

    #[test]
    fn test_mz_to_mass() {
        let mz = mass_to_mz(1234.5678, 4, 1.007276);
        assert!((mz_to_mass(mz, 4, 1.007276) - 1234.5678).abs() < 1e-9);
    }

    /// Four glycines, no N-terminal and a water-like C-terminal modification.
    pub fn gggg_parent() -> ParentSequence {
        ParentSequence::new("GGGG", 0.0, 18.0027)
    }

    /// Two spectra with a few peaks matching GGGG ions at charge 0 and 1.
    /// Ceilinged abundances and background put the peaks into different weight regimes.
    pub fn gggg_spectra() -> ObservedSpectra {
        let mz = Array1::from(vec![
            57.0214, 75.0241, 124.05195, 247.0961, 300.0, // spectrum 1
            57.0224, 246.0883, 500.0, // spectrum 2
        ]);
        let abundance = Array1::from(vec![
            1000.0, 400.0, 800.0, 1200.0, 50.0, 900.0, 2000.0, 30.0,
        ]);
        let spectrum_index = vec![1, 1, 1, 1, 1, 2, 2, 2];
        let abundance_ceiling = Array1::from(vec![
            1000.0, 400.0, 800.0, 1000.0, 50.0, 900.0, 1000.0, 30.0,
        ]);
        let background = Array1::from(vec![100.0; 8]);

        ObservedSpectra::new(&mz, &abundance, &spectrum_index)
            .unwrap()
            .with_abundance_ceiling(&abundance_ceiling)
            .unwrap()
            .with_background(&background)
            .unwrap()
    }
}
