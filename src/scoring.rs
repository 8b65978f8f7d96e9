use std::{collections::BTreeMap, fmt, str::FromStr};

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    matching::{MatchedIon, TheoreticalIon},
    scoring_result::StructureScore,
    spectrum::ObservedPeak,
};

/// Scores a single hypothetical structure from its matched peaks.
pub trait ScoringStrategy: Sync {
    /// # Arguments
    /// * `matched` - Peaks of every matched row of the structure.
    /// * `ions_total` - Number of theoretical ions of the structure.
    /// * `n_spectra` - Number of spectra the ions were matched against.
    ///
    fn score(&self, matched: &[&ObservedPeak], ions_total: usize, n_spectra: usize)
        -> Result<f64, Error>;
}

/// Matched rows over all possible (ion, spectrum) pairs.
/// Not bounded by 1 as an ion may match several peaks of the same spectrum.
pub struct FractionMatched;

impl ScoringStrategy for FractionMatched {
    fn score(
        &self,
        matched: &[&ObservedPeak],
        ions_total: usize,
        n_spectra: usize,
    ) -> Result<f64, Error> {
        Ok(matched.len() as f64 / (ions_total * n_spectra) as f64)
    }
}

/// Like [`FractionMatched`] but every matched row counts with [`abundance_weight`]
/// of its signal to background ratio.
pub struct AbundanceWeighted;

impl ScoringStrategy for AbundanceWeighted {
    fn score(
        &self,
        matched: &[&ObservedPeak],
        ions_total: usize,
        n_spectra: usize,
    ) -> Result<f64, Error> {
        let ratios = matched
            .iter()
            .map(|peak| match (peak.abundance_ceiling, peak.background) {
                (Some(abundance_ceiling), Some(background)) => Ok(abundance_ceiling / background),
                _ => Err(Error::MissingWeightInputs {
                    mz: peak.mz,
                    spectrum_index: peak.spectrum_index,
                }),
            })
            .collect::<Result<Array1<f64>, Error>>()?;

        let weights = ratios.mapv(abundance_weight);
        Ok(weights.sum() / (ions_total * n_spectra) as f64)
    }
}

/// Weight of a matched peak given its abundance to background ratio.
///
/// The breakpoints are empirical; the jump after 9.5 is intended.
/// NaN ratios (0/0) are passed through.
pub fn abundance_weight(ratio: f64) -> f64 {
    if ratio < 4.0 {
        0.0
    } else if (4.0..=5.0).contains(&ratio) {
        6.4 * (ratio / 10.0).powi(3)
    } else if ratio > 5.0 && ratio <= 6.25 {
        ratio / 6.25
    } else if ratio > 6.25 && ratio <= 8.0 {
        (ratio / 6.25).sqrt()
    } else if ratio > 8.0 && ratio <= 9.5 {
        0.5656854 * ratio.powf(1.0 / 3.0)
    } else if ratio > 9.5 {
        1.2
    } else {
        ratio
    }
}

/// Available scoring methods.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMethod {
    /// Fraction of matched ions.
    Frac,
    /// Abundance weighted fraction of matched ions.
    Weights,
}

impl ScoringMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMethod::Frac => "frac",
            ScoringMethod::Weights => "weights",
        }
    }

    pub fn strategy(&self) -> &'static dyn ScoringStrategy {
        match self {
            ScoringMethod::Frac => &FractionMatched,
            ScoringMethod::Weights => &AbundanceWeighted,
        }
    }
}

impl FromStr for ScoringMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frac" => Ok(ScoringMethod::Frac),
            "weights" => Ok(ScoringMethod::Weights),
            _ => Err(Error::UnsupportedScoringMethod(s.to_string())),
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Scores every hypothetical structure present in `all_ions`, ordered by `hs_id`.
///
/// # Arguments
/// * `matched` - Output of [`crate::matching::match_ions`].
/// * `all_ions` - Every theoretical ion that was matched against the spectra.
/// * `n_spectra` - Number of spectra.
/// * `method` - Scoring method.
///
pub fn score<I: TheoreticalIon>(
    matched: &[MatchedIon<I>],
    all_ions: &[I],
    n_spectra: usize,
    method: ScoringMethod,
) -> Result<Vec<StructureScore>, Error> {
    if n_spectra == 0 {
        return Err(Error::NoSpectra);
    }

    let mut ions_total: BTreeMap<usize, usize> = BTreeMap::new();
    for ion in all_ions {
        *ions_total.entry(ion.hs_id()).or_default() += 1;
    }

    let mut matched_peaks: BTreeMap<usize, Vec<&ObservedPeak>> = BTreeMap::new();
    for matched_ion in matched {
        matched_peaks
            .entry(matched_ion.ion.hs_id())
            .or_default()
            .push(&matched_ion.peak);
    }

    let strategy = method.strategy();
    let scores = ions_total
        .into_iter()
        .map(|(hs_id, ions_total)| {
            let peaks = matched_peaks
                .get(&hs_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            Ok(StructureScore {
                hs_id,
                score: strategy.score(peaks, ions_total, n_spectra)?,
                score_method: method,
                ions_total,
                ions_matched: peaks.len(),
            })
        })
        .collect::<Result<Vec<StructureScore>, Error>>()?;

    debug!(
        "Scored {} hypothetical structures with {}",
        scores.len(),
        method
    );

    Ok(scores)
}

/// Hypothetical structures sharing the highest score. NaN scores are ignored.
pub fn best_structures(scores: &[StructureScore]) -> Vec<usize> {
    let best = scores
        .iter()
        .map(|score| score.score)
        .filter(|score| !score.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);

    scores
        .iter()
        .filter(|score| score.score == best)
        .map(|score| score.hs_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Ion(usize);

    impl TheoreticalIon for Ion {
        fn hs_id(&self) -> usize {
            self.0
        }

        fn theoretical_mz(&self) -> f64 {
            0.0
        }
    }

    fn peak(abundance_ceiling: f64, background: f64) -> ObservedPeak {
        ObservedPeak {
            mz: 100.0,
            abundance: abundance_ceiling,
            spectrum_index: 1,
            abundance_ceiling: Some(abundance_ceiling),
            background: Some(background),
        }
    }

    fn matched(hs_id: usize, peak: ObservedPeak) -> MatchedIon<Ion> {
        MatchedIon {
            ion: Ion(hs_id),
            peak_index: 0,
            peak,
        }
    }

    #[test]
    fn test_abundance_weight() {
        assert_eq!(abundance_weight(0.0), 0.0);
        assert_eq!(abundance_weight(3.999), 0.0);
        assert!((abundance_weight(4.0) - 0.4096).abs() < 1e-12);
        assert!((abundance_weight(5.0) - 0.8).abs() < 1e-12);
        assert!((abundance_weight(6.25) - 1.0).abs() < 1e-12);
        assert!((abundance_weight(8.0) - (8.0f64 / 6.25).sqrt()).abs() < 1e-12);
        assert!((abundance_weight(9.5) - 0.5656854 * 9.5f64.powf(1.0 / 3.0)).abs() < 1e-12);
        assert_eq!(abundance_weight(9.5000001), 1.2);
        assert_eq!(abundance_weight(10.0), 1.2);
        assert_eq!(abundance_weight(f64::INFINITY), 1.2);
        assert!(abundance_weight(f64::NAN).is_nan());
    }

    #[test]
    fn test_scoring_method_from_str() {
        assert_eq!("frac".parse::<ScoringMethod>().unwrap(), ScoringMethod::Frac);
        assert_eq!(
            "weights".parse::<ScoringMethod>().unwrap(),
            ScoringMethod::Weights
        );
        match "xcorr".parse::<ScoringMethod>() {
            Err(Error::UnsupportedScoringMethod(method)) => assert_eq!(method, "xcorr"),
            other => panic!("Expected UnsupportedScoringMethod, got {:?}", other),
        }
        assert_eq!(ScoringMethod::Weights.to_string(), "weights");
    }

    #[test]
    fn test_frac() {
        let all_ions = vec![Ion(0), Ion(0), Ion(1), Ion(1), Ion(2), Ion(2)];
        let matched_ions = vec![
            matched(0, peak(1.0, 1.0)),
            matched(2, peak(1.0, 1.0)),
            matched(2, peak(1.0, 1.0)),
            matched(2, peak(1.0, 1.0)),
            matched(2, peak(1.0, 1.0)),
            matched(2, peak(1.0, 1.0)),
        ];
        let scores = score(&matched_ions, &all_ions, 2, ScoringMethod::Frac).unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].hs_id, 0);
        assert_eq!(scores[0].score, 0.25);
        // No matches at all
        assert_eq!(scores[1].score, 0.0);
        assert_eq!(scores[1].ions_matched, 0);
        // Multiple peaks per ion push the score above 1
        assert_eq!(scores[2].score, 1.25);
        assert_eq!(scores[2].ions_matched, 5);
        assert_eq!(scores[2].ions_total, 2);
        assert!(scores.iter().all(|s| s.score_method == ScoringMethod::Frac));
        assert_eq!(best_structures(&scores), vec![2]);
    }

    #[test]
    fn test_frac_all_matched() {
        // Each ion hits exactly one peak in each of the three spectra
        let all_ions = vec![Ion(0), Ion(0), Ion(0), Ion(0)];
        let matched_ions: Vec<MatchedIon<Ion>> = (0..all_ions.len() * 3)
            .map(|_| matched(0, peak(1.0, 1.0)))
            .collect();
        let scores = score(&matched_ions, &all_ions, 3, ScoringMethod::Frac).unwrap();

        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].score, 1.0);
        assert_eq!(scores[0].ions_matched, 12);
        assert_eq!(scores[0].ions_total, 4);
    }

    #[test]
    fn test_weights() {
        let all_ions = vec![Ion(0), Ion(0), Ion(1), Ion(1)];
        let matched_ions = vec![
            matched(0, peak(400.0, 100.0)),
            matched(0, peak(1000.0, 100.0)),
            matched(1, peak(300.0, 100.0)),
        ];
        let scores = score(&matched_ions, &all_ions, 1, ScoringMethod::Weights).unwrap();

        assert_eq!(scores.len(), 2);
        assert!((scores[0].score - (0.4096 + 1.2) / 2.0).abs() < 1e-12);
        assert_eq!(scores[1].score, 0.0);
        assert_eq!(scores[1].ions_matched, 1);
        assert_eq!(best_structures(&scores), vec![0]);
    }

    #[test]
    fn test_weights_missing_inputs() {
        let mut unannotated = peak(400.0, 100.0);
        unannotated.background = None;
        let matched_ions = vec![matched(0, unannotated)];
        assert!(matches!(
            score(&matched_ions, &[Ion(0)], 1, ScoringMethod::Weights),
            Err(Error::MissingWeightInputs { .. })
        ));
        // Frac does not need them
        assert!(score(&matched_ions, &[Ion(0)], 1, ScoringMethod::Frac).is_ok());
    }

    #[test]
    fn test_no_spectra() {
        assert!(matches!(
            score::<Ion>(&[], &[Ion(0)], 0, ScoringMethod::Frac),
            Err(Error::NoSpectra)
        ));
    }

    #[test]
    fn test_best_structures_ties() {
        let all_ions = vec![Ion(0), Ion(1), Ion(2)];
        let matched_ions = vec![matched(0, peak(1.0, 1.0)), matched(2, peak(1.0, 1.0))];
        let scores = score(&matched_ions, &all_ions, 1, ScoringMethod::Frac).unwrap();
        assert_eq!(best_structures(&scores), vec![0, 2]);
        assert!(best_structures(&[]).is_empty());
    }
}
