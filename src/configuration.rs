use serde::{Deserialize, Serialize};

use crate::scoring::ScoringMethod;

/// Monoisotopic mass of a proton (Da).
pub const PROTON_MASS: f64 = 1.007276;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Absolute m/z tolerance for matching theoretical ions to peaks.
    pub tolerance: f64,
    /// Charge states added to the neutral fragments.
    pub charges: Vec<usize>,
    pub proton_mass: f64,
    pub scoring_method: ScoringMethod,
}

impl Configuration {
    pub fn new(
        tolerance: f64,
        charges: Vec<usize>,
        proton_mass: f64,
        scoring_method: ScoringMethod,
    ) -> Self {
        Self {
            tolerance,
            charges,
            proton_mass,
            scoring_method,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(0.02, vec![1, 2, 3], PROTON_MASS, ScoringMethod::Frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_from_json() {
        let config: Configuration = serde_json::from_str(
            r#"{"tolerance": 0.5, "charges": [1, 2], "proton_mass": 1.0078, "scoring_method": "weights"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            Configuration::new(0.5, vec![1, 2], 1.0078, ScoringMethod::Weights)
        );

        let unsupported = serde_json::from_str::<Configuration>(
            r#"{"tolerance": 0.5, "charges": [1], "proton_mass": 1.0078, "scoring_method": "xcorr"}"#,
        );
        assert!(unsupported.is_err());
    }
}
