use std::cmp::Ordering;

use crate::model::{EnrichmentParams, KinaseHit, SiteAssignment};

/// Orders candidates descending by the sort metric (stable, so ties keep
/// kinase enumeration order), drops entries whose threshold metric does
/// not strictly exceed the threshold, then truncates to top-n.
pub fn rank_hits(mut hits: Vec<KinaseHit>, params: &EnrichmentParams) -> SiteAssignment {
    hits.sort_by(|a, b| {
        b.metric(params.sort_type)
            .partial_cmp(&a.metric(params.sort_type))
            .unwrap_or(Ordering::Equal)
    });
    hits.retain(|hit| hit.metric(params.threshold_type) > params.threshold);
    hits.truncate(params.top_n);
    SiteAssignment { hits }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_rank.rs"]
mod tests;
