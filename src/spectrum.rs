use std::collections::BTreeSet;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single observed peak.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservedPeak {
    pub mz: f64,
    pub abundance: f64,
    pub spectrum_index: usize,
    /// Abundance capped by an external preprocessing step.
    pub abundance_ceiling: Option<f64>,
    /// Local background estimate from an external preprocessing step.
    pub background: Option<f64>,
}

/// Peaks of one or more MS/MS spectra of the same precursor, stored column-wise.
#[derive(Clone, Debug)]
pub struct ObservedSpectra {
    mz: Array1<f64>,
    abundance: Array1<f64>,
    spectrum_index: Vec<usize>,
    abundance_ceiling: Option<Array1<f64>>,
    background: Option<Array1<f64>>,
}

impl ObservedSpectra {
    /// Creates a new peak table. An empty table is valid and matches nothing.
    ///
    /// Arguments:
    /// * `mz` - m/z of every peak.
    /// * `abundance` - Abundance of every peak.
    /// * `spectrum_index` - Spectrum each peak was read from.
    ///
    pub fn new(
        mz: &Array1<f64>,
        abundance: &Array1<f64>,
        spectrum_index: &[usize],
    ) -> Result<Self, Error> {
        Self::check_shape(mz.len(), "abundance", abundance.len())?;
        Self::check_shape(mz.len(), "spectrum index", spectrum_index.len())?;

        Ok(Self {
            mz: mz.clone(),
            abundance: abundance.clone(),
            spectrum_index: spectrum_index.to_vec(),
            abundance_ceiling: None,
            background: None,
        })
    }

    /// Builds the peak table from row records. The ceiling and background columns
    /// are only kept if every peak carries them.
    pub fn from_peaks(peaks: &[ObservedPeak]) -> Result<Self, Error> {
        let mz: Array1<f64> = peaks.iter().map(|peak| peak.mz).collect();
        let abundance: Array1<f64> = peaks.iter().map(|peak| peak.abundance).collect();
        let spectrum_index: Vec<usize> = peaks.iter().map(|peak| peak.spectrum_index).collect();
        let mut spectra = Self::new(&mz, &abundance, &spectrum_index)?;

        spectra.abundance_ceiling = peaks
            .iter()
            .map(|peak| peak.abundance_ceiling)
            .collect::<Option<Array1<f64>>>();
        spectra.background = peaks
            .iter()
            .map(|peak| peak.background)
            .collect::<Option<Array1<f64>>>();

        Ok(spectra)
    }

    fn check_shape(expected: usize, column: &'static str, actual: usize) -> Result<(), Error> {
        if expected != actual {
            return Err(Error::ExperimentalSpectrumShape(expected, column, actual));
        }
        Ok(())
    }

    /// Attaches the ceilinged abundances.
    pub fn with_abundance_ceiling(mut self, abundance_ceiling: &Array1<f64>) -> Result<Self, Error> {
        Self::check_shape(self.len(), "abundance ceiling", abundance_ceiling.len())?;
        self.abundance_ceiling = Some(abundance_ceiling.clone());
        Ok(self)
    }

    /// Attaches the background estimates.
    pub fn with_background(mut self, background: &Array1<f64>) -> Result<Self, Error> {
        Self::check_shape(self.len(), "background", background.len())?;
        self.background = Some(background.clone());
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    pub fn mz(&self) -> &Array1<f64> {
        &self.mz
    }

    pub fn abundance(&self) -> &Array1<f64> {
        &self.abundance
    }

    pub fn spectrum_index(&self) -> &[usize] {
        &self.spectrum_index
    }

    /// Number of distinct spectra contributing peaks.
    pub fn spectrum_count(&self) -> usize {
        self.spectrum_index.iter().collect::<BTreeSet<_>>().len()
    }

    /// Row view of the peak at `index`.
    pub fn peak(&self, index: usize) -> Option<ObservedPeak> {
        if index >= self.len() {
            return None;
        }
        Some(ObservedPeak {
            mz: self.mz[index],
            abundance: self.abundance[index],
            spectrum_index: self.spectrum_index[index],
            abundance_ceiling: self.abundance_ceiling.as_ref().map(|column| column[index]),
            background: self.background.as_ref().map(|column| column[index]),
        })
    }

    pub fn peaks(&self) -> Vec<ObservedPeak> {
        (0..self.len()).filter_map(|index| self.peak(index)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tests::gggg_spectra;

    #[test]
    fn test_spectrum_shape() {
        let mz = Array1::from(vec![100.0, 200.0, 300.0]);
        let abundance = Array1::from(vec![10.0, 20.0]);
        assert!(matches!(
            ObservedSpectra::new(&mz, &abundance, &[1, 1, 1]),
            Err(Error::ExperimentalSpectrumShape(3, "abundance", 2))
        ));

        let abundance = Array1::from(vec![10.0, 20.0, 30.0]);
        assert!(matches!(
            ObservedSpectra::new(&mz, &abundance, &[1, 1]),
            Err(Error::ExperimentalSpectrumShape(3, "spectrum index", 2))
        ));

        let spectra = ObservedSpectra::new(&mz, &abundance, &[1, 1, 2]).unwrap();
        assert!(matches!(
            spectra.with_background(&Array1::from(vec![1.0])),
            Err(Error::ExperimentalSpectrumShape(3, "background", 1))
        ));
    }

    #[test]
    fn test_empty_spectrum() {
        let empty: Array1<f64> = Array1::zeros(0);
        let spectra = ObservedSpectra::new(&empty, &empty, &[]).unwrap();
        assert!(spectra.is_empty());
        assert_eq!(spectra.spectrum_count(), 0);
        assert!(spectra.peaks().is_empty());
        assert!(ObservedSpectra::from_peaks(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_peaks() {
        let spectra = gggg_spectra();
        assert_eq!(spectra.len(), 8);
        assert_eq!(spectra.spectrum_count(), 2);

        let peak = spectra.peak(3).unwrap();
        assert_eq!(peak.mz, 247.0961);
        assert_eq!(peak.abundance, 1200.0);
        assert_eq!(peak.spectrum_index, 1);
        assert_eq!(peak.abundance_ceiling, Some(1000.0));
        assert_eq!(peak.background, Some(100.0));
        assert!(spectra.peak(8).is_none());
    }

    #[test]
    fn test_from_peaks() {
        let spectra = gggg_spectra();
        let rebuilt = ObservedSpectra::from_peaks(&spectra.peaks()).unwrap();
        assert_eq!(rebuilt.peaks(), spectra.peaks());

        let mut peaks = spectra.peaks();
        peaks[0].background = None;
        let partial = ObservedSpectra::from_peaks(&peaks).unwrap();
        assert!(partial.peaks().iter().all(|peak| peak.background.is_none()));
        assert!(partial.peaks().iter().all(|peak| peak.abundance_ceiling.is_some()));
    }
}
