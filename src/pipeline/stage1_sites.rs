use std::collections::{BTreeSet, HashMap};

use crate::input::EnrichmentRequest;
use crate::model::{RegulationLabel, Site};

#[derive(Debug)]
pub struct Stage1Output {
    pub sites: Vec<Site>,
    pub n_peptides: usize,
    pub n_dropped_empty: usize,
}

/// Explodes each peptide into its candidate windows and redistributes the
/// peptide's evidence weight: divide by the number of windows the peptide
/// splits into, then divide again by the number of exploded rows across
/// the whole request that share the identical window string. Empty window
/// strings count toward the first division but are dropped afterwards.
pub fn build_sites(request: &EnrichmentRequest) -> Stage1Output {
    struct Row<'a> {
        window: &'a str,
        weight: f64,
        peptide: usize,
    }

    let mut rows: Vec<Row<'_>> = Vec::new();
    for (p, peptide) in request.peptides.iter().enumerate() {
        let parts: Vec<&str> = peptide.windows.split(';').collect();
        let base = peptide.weight.unwrap_or(1.0) / parts.len() as f64;
        for part in parts {
            rows.push(Row {
                window: part,
                weight: base,
                peptide: p,
            });
        }
    }

    let mut window_multiplicity: HashMap<&str, usize> = HashMap::new();
    for row in &rows {
        *window_multiplicity.entry(row.window).or_insert(0) += 1;
    }

    let mut unknown_calls: BTreeSet<&str> = BTreeSet::new();
    let mut labels_by_peptide: Vec<Vec<RegulationLabel>> =
        Vec::with_capacity(request.peptides.len());
    for peptide in &request.peptides {
        let labels = peptide
            .regulations
            .iter()
            .map(|call| match call.as_deref() {
                None | Some("") => RegulationLabel::Missing,
                Some(raw) => RegulationLabel::from_call(raw).unwrap_or_else(|| {
                    unknown_calls.insert(raw);
                    RegulationLabel::Missing
                }),
            })
            .collect();
        labels_by_peptide.push(labels);
    }
    for call in unknown_calls {
        tracing::warn!(call, "unrecognized regulation call treated as missing");
    }

    let mut sites = Vec::with_capacity(rows.len());
    let mut n_dropped_empty = 0usize;
    for row in rows {
        if row.window.is_empty() {
            n_dropped_empty += 1;
            continue;
        }
        sites.push(Site {
            window: row.window.to_string(),
            weight: row.weight / window_multiplicity[row.window] as f64,
            labels: labels_by_peptide[row.peptide].clone(),
        });
    }

    if n_dropped_empty > 0 {
        tracing::warn!(
            n_dropped_empty,
            "windows without a sequence context were dropped"
        );
    }

    Stage1Output {
        sites,
        n_peptides: request.peptides.len(),
        n_dropped_empty,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_sites.rs"]
mod tests;
