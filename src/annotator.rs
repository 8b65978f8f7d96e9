use tracing::{debug, instrument};

use crate::{
    charge::{add_charges, ChargedIon},
    configuration::Configuration,
    error::Error,
    fragment::{fragment, FragmentIon, ParentSequence},
    hypothetical_structure::{generate, HypotheticalStructure},
    matching::{match_ions, MatchedIon},
    ptm::Ptm,
    scoring::score,
    scoring_result::StructureScore,
    spectrum::ObservedSpectra,
};

/// Every relation produced while annotating a parent sequence.
#[derive(Clone, Debug)]
pub struct Annotation {
    pub structures: Vec<HypotheticalStructure>,
    pub fragments: Vec<FragmentIon>,
    pub charged_ions: Vec<ChargedIon>,
    pub matched: Vec<MatchedIon<ChargedIon>>,
    pub scores: Vec<StructureScore>,
}

pub struct StructureAnnotator<'a> {
    config: &'a Configuration,
    spectra: &'a ObservedSpectra,
}

impl StructureAnnotator<'_> {
    /// Creates a new StructureAnnotator instance.
    ///
    /// Arguments:
    /// * `config` - Charges, tolerance and scoring method.
    /// * `spectra` - Observed peaks of all spectra to annotate.
    ///
    pub fn new<'a>(
        config: &'a Configuration,
        spectra: &'a ObservedSpectra,
    ) -> StructureAnnotator<'a> {
        StructureAnnotator { config, spectra }
    }

    /// Enumerates, fragments, charges, matches and scores every hypothetical structure
    /// of `parent` decorated with the PTMs of `catalog`.
    ///
    /// # Arguments
    /// * `catalog` - PTM candidates.
    /// * `parent` - Parent sequence and terminal modifications.
    ///
    #[instrument(level = "debug", skip_all, fields(sequence = %parent.sequence))]
    pub fn annotate(&self, catalog: &[Ptm], parent: &ParentSequence) -> Result<Annotation, Error> {
        let structures: Vec<HypotheticalStructure> = generate(catalog)?.collect();
        let fragments = fragment(&structures, catalog, parent)?;
        let charged_ions = add_charges(&fragments, &self.config.charges, self.config.proton_mass)?;
        let matched = match_ions(self.spectra, &charged_ions, self.config.tolerance)?;
        let scores = score(
            &matched,
            &charged_ions,
            self.spectra.spectrum_count(),
            self.config.scoring_method,
        )?;

        debug!(
            "Annotated {} hypothetical structures with {} matches",
            structures.len(),
            matched.len()
        );

        Ok(Annotation {
            structures,
            fragments,
            charged_ions,
            matched,
            scores,
        })
    }
}
