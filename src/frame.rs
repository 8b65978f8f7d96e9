use polars::prelude::*;

use crate::{
    charge::ChargedIon, error::Error, fragment::FragmentIon,
    hypothetical_structure::PlacementRow, matching::MatchedIon,
    scoring_result::StructureScore,
};

fn to_u64(values: impl Iterator<Item = usize>) -> Vec<u64> {
    values.map(|value| value as u64).collect()
}

/// Long-form hypothetical structure relation: `hs_id`, `ptm_index`, `ptm_locations`.
pub fn placements_frame(rows: &[PlacementRow]) -> Result<DataFrame, Error> {
    let ptm_locations: Vec<Series> = rows
        .iter()
        .map(|row| {
            Series::new(
                PlSmallStr::EMPTY,
                to_u64(row.ptm_locations.iter().copied()),
            )
        })
        .collect();

    Ok(DataFrame::new(vec![
        Column::new("hs_id".into(), to_u64(rows.iter().map(|row| row.hs_id))),
        Column::new("ptm_index".into(), to_u64(rows.iter().map(|row| row.ptm_index))),
        Column::from(Series::new("ptm_locations".into(), ptm_locations)),
    ])?)
}

fn fragment_columns<'a>(
    fragments: impl Iterator<Item = &'a FragmentIon> + Clone,
    ion_names: Vec<String>,
) -> Vec<Column> {
    vec![
        Column::new(
            "hs_id".into(),
            to_u64(fragments.clone().map(|ion| ion.hs_id)),
        ),
        Column::new(
            "seq".into(),
            fragments.clone().map(|ion| ion.seq.clone()).collect::<Vec<String>>(),
        ),
        Column::new("ion_name".into(), ion_names),
        Column::new(
            "ion_type".into(),
            fragments
                .map(|ion| ion.name.ion_type.to_string())
                .collect::<Vec<String>>(),
        ),
    ]
}

/// Fragment ion relation: `hs_id`, `seq`, `ion_name` (e.g. `b4`), `ion_type`, `mass`.
pub fn fragments_frame(fragments: &[FragmentIon]) -> Result<DataFrame, Error> {
    let mut columns = fragment_columns(
        fragments.iter(),
        fragments.iter().map(|ion| ion.name.to_string()).collect(),
    );
    columns.push(Column::new(
        "mass".into(),
        fragments.iter().map(|ion| ion.mass).collect::<Vec<f64>>(),
    ));
    Ok(DataFrame::new(columns)?)
}

fn charged_columns<'a>(ions: impl Iterator<Item = &'a ChargedIon> + Clone) -> Vec<Column> {
    let mut columns = fragment_columns(
        ions.clone().map(|ion| &ion.fragment),
        ions.clone().map(ChargedIon::label).collect(),
    );
    columns.push(Column::new(
        "mass".into(),
        ions.clone().map(|ion| ion.mz).collect::<Vec<f64>>(),
    ));
    columns.push(Column::new("charge".into(), to_u64(ions.map(|ion| ion.charge))));
    columns
}

/// Charged ion relation. `mass` holds the m/z for charged ions and `ion_name`
/// the plot label, e.g. `$b_{4}^{+2}$`.
pub fn charged_frame(ions: &[ChargedIon]) -> Result<DataFrame, Error> {
    Ok(DataFrame::new(charged_columns(ions.iter()))?)
}

/// Matched ion relation, charged ion columns followed by the peak columns.
pub fn matched_frame(matched: &[MatchedIon<ChargedIon>]) -> Result<DataFrame, Error> {
    let mut columns = charged_columns(matched.iter().map(|row| &row.ion));
    columns.extend([
        Column::new(
            "m/z".into(),
            matched.iter().map(|row| row.peak.mz).collect::<Vec<f64>>(),
        ),
        Column::new(
            "abundance".into(),
            matched
                .iter()
                .map(|row| row.peak.abundance)
                .collect::<Vec<f64>>(),
        ),
        Column::new(
            "spectrum_index".into(),
            to_u64(matched.iter().map(|row| row.peak.spectrum_index)),
        ),
        Column::new(
            "abund_ceil".into(),
            matched
                .iter()
                .map(|row| row.peak.abundance_ceiling)
                .collect::<Vec<Option<f64>>>(),
        ),
        Column::new(
            "bkgd".into(),
            matched
                .iter()
                .map(|row| row.peak.background)
                .collect::<Vec<Option<f64>>>(),
        ),
    ]);
    Ok(DataFrame::new(columns)?)
}

/// Score relation: `hs_id`, `score`, `score_method`.
pub fn scores_frame(scores: &[StructureScore]) -> Result<DataFrame, Error> {
    Ok(DataFrame::new(vec![
        Column::new("hs_id".into(), to_u64(scores.iter().map(|s| s.hs_id))),
        Column::new(
            "score".into(),
            scores.iter().map(|s| s.score).collect::<Vec<f64>>(),
        ),
        Column::new(
            "score_method".into(),
            scores
                .iter()
                .map(|s| s.score_method.to_string())
                .collect::<Vec<String>>(),
        ),
    ])?)
}
