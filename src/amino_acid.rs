use crate::error::Error;

/// Monoisotopic masses of polymerized amino acids (Da).
/// `B` and `J` are free slots for custom residues.
pub const AMINO_ACID_MASSES: [(char, f64); 22] = [
    ('A', 71.0371),
    ('C', 103.0091),
    ('D', 115.0269),
    ('E', 129.0426),
    ('F', 147.0684),
    ('G', 57.0214),
    ('H', 137.0589),
    ('I', 113.0840),
    ('K', 128.0949),
    ('L', 113.0840),
    ('M', 131.0404),
    ('N', 114.0429),
    ('P', 97.0527),
    ('Q', 128.0585),
    ('R', 156.1011),
    ('S', 87.0320),
    ('T', 101.0476),
    ('V', 99.0684),
    ('W', 186.0793),
    ('Y', 163.0633),
    ('B', 69.03),
    ('J', 83.03),
];

/// Returns the residue mass for a single-letter amino acid code.
///
/// # Arguments
/// * `code` - Single-letter code, case sensitive.
///
pub fn residue_mass(code: char) -> Result<f64, Error> {
    AMINO_ACID_MASSES
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, mass)| *mass)
        .ok_or(Error::UnknownResidue(code))
}

/// Looks up every residue of a sequence. Fails on the first unknown code.
pub fn residue_masses(sequence: &str) -> Result<Vec<f64>, Error> {
    sequence.chars().map(residue_mass).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residue_mass() {
        assert_eq!(residue_mass('G').unwrap(), 57.0214);
        assert_eq!(residue_mass('W').unwrap(), 186.0793);
        assert_eq!(residue_mass('J').unwrap(), 83.03);
        // Leucine and isoleucine are isobaric
        assert_eq!(residue_mass('I').unwrap(), residue_mass('L').unwrap());
    }

    #[test]
    fn test_unknown_residue() {
        assert!(matches!(residue_mass('X'), Err(Error::UnknownResidue('X'))));
        assert!(matches!(residue_mass('g'), Err(Error::UnknownResidue('g'))));
        assert!(matches!(
            residue_masses("GGZG"),
            Err(Error::UnknownResidue('Z'))
        ));
    }
}
