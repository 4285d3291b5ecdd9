use crate::model::EnrichmentRecord;
use crate::pipeline::stage5_test::TestedKinase;
use crate::stats::benjamini_hochberg;

/// Recovers raw p-values from their -log10 form, applies the
/// Benjamini-Hochberg adjustment across all tested kinases of one
/// experiment and stores the adjusted values as -log10 alongside the raw
/// ones.
pub fn adjust_experiment(tested: Vec<TestedKinase>) -> Vec<EnrichmentRecord> {
    let pvals: Vec<f64> = tested
        .iter()
        .map(|t| 10f64.powf(-t.neg_log10_p))
        .collect();
    let adjusted = benjamini_hochberg(&pvals);

    tested
        .into_iter()
        .zip(adjusted)
        .map(|(t, p_adj)| EnrichmentRecord {
            kinase: t.kinase,
            counts: t.counts,
            neg_log10_p: t.neg_log10_p,
            log2_odds: t.log2_odds,
            neg_log10_p_adj: -p_adj.log10(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_adjust.rs"]
mod tests;
