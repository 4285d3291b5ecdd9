pub mod stage1_sites;
pub mod stage2_score;
pub mod stage3_rank;
pub mod stage4_aggregate;
pub mod stage6_adjust;

use crate::model::{EnrichmentRecord, Site, SiteAssignment};

/// Runs aggregation, directional testing and FDR adjustment for one
/// experiment column. An experiment with no kinase evidence yields an
/// empty record list; the report layer still emits its column group.
pub fn run_experiment(
    sites: &[Site],
    assignments: &[SiteAssignment],
    experiment: usize,
) -> Vec<EnrichmentRecord> {
    let aggregated = stage4_aggregate::aggregate_evidence(sites, assignments, experiment);
    tracing::debug!(
        experiment,
        labeled_sites = aggregated.n_labeled_sites,
        weight_up = aggregated.totals.up,
        weight_down = aggregated.totals.down,
        weight_not = aggregated.totals.not,
        kinases = aggregated.counts.len(),
        "evidence aggregated"
    );
    if aggregated.counts.is_empty() {
        return Vec::new();
    }
    let tested = stage5_test::run_enrichment_tests(&aggregated);
    stage6_adjust::adjust_experiment(tested)
}
