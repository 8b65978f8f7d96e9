use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    spectrum::{ObservedPeak, ObservedSpectra},
};

/// Anything with a theoretical m/z belonging to a hypothetical structure.
pub trait TheoreticalIon {
    fn hs_id(&self) -> usize;
    fn theoretical_mz(&self) -> f64;
}

/// A theoretical ion paired with an observed peak inside the tolerance window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchedIon<I> {
    pub ion: I,
    /// Row of the peak within the observed spectra.
    pub peak_index: usize,
    pub peak: ObservedPeak,
}

/// Matches theoretical ions against observed peaks.
///
/// Every (ion, peak) pair with `|peak m/z - theoretical m/z| <= tolerance` yields a row, ordered by ion
/// and then by the peak's position in `spectra`.
///
/// # Arguments
/// * `spectra` - Observed peaks.
/// * `ions` - Theoretical ions, neutral or charged.
/// * `tolerance` - Absolute m/z tolerance.
///
pub fn match_ions<I>(
    spectra: &ObservedSpectra,
    ions: &[I],
    tolerance: f64,
) -> Result<Vec<MatchedIon<I>>, Error>
where
    I: TheoreticalIon + Clone + Send + Sync,
{
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(Error::InvalidTolerance(tolerance));
    }

    let mz = spectra.mz();
    let mut order: Vec<usize> = (0..mz.len()).filter(|&index| !mz[index].is_nan()).collect();
    order.sort_by(|&a, &b| mz[a].total_cmp(&mz[b]));
    let sorted_mz: Vec<f64> = order.iter().map(|&index| mz[index]).collect();
    let peaks = spectra.peaks();

    let matched = ions
        .par_iter()
        .flat_map_iter(|ion| {
            let target = ion.theoretical_mz();
            let lower = target - tolerance;
            let upper = target + tolerance;

            let start = sorted_mz.partition_point(|&peak_mz| peak_mz < lower);
            let end = start + sorted_mz[start..].partition_point(|&peak_mz| peak_mz <= upper);

            let mut peak_indexes = order[start..end].to_vec();
            peak_indexes.sort_unstable();
            let peaks = &peaks;
            peak_indexes.into_iter().map(move |peak_index| MatchedIon {
                ion: ion.clone(),
                peak_index,
                peak: peaks[peak_index].clone(),
            })
        })
        .collect::<Vec<MatchedIon<I>>>();

    debug!(
        "{} matches for {} theoretical ions against {} peaks (tolerance {})",
        matched.len(),
        ions.len(),
        spectra.len(),
        tolerance
    );

    Ok(matched)
}

/// Matches belonging to one hypothetical structure in one spectrum, e.g. for labelling a plot.
pub fn matches_for<I: TheoreticalIon>(
    matched: &[MatchedIon<I>],
    hs_id: usize,
    spectrum_index: usize,
) -> impl Iterator<Item = &MatchedIon<I>> {
    matched.iter().filter(move |matched_ion| {
        matched_ion.ion.hs_id() == hs_id && matched_ion.peak.spectrum_index == spectrum_index
    })
}
