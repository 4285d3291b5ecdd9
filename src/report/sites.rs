use std::fmt::Write;

use crate::model::{Site, SiteAssignment};
use crate::reference::ReferenceStore;

/// Renders the per-site annotation table: each site's window, weight and
/// regulation calls plus its ranked kinases as four semicolon-joined
/// columns, values rounded to three decimals.
pub fn render_site_table(
    sites: &[Site],
    assignments: &[SiteAssignment],
    experiments: &[String],
    refs: &ReferenceStore,
) -> String {
    let mut out = String::new();

    out.push_str("window\tweight");
    for experiment in experiments {
        let _ = write!(out, "\t{}", experiment);
    }
    out.push_str("\tTop Motif Kinases\tTop Motif Scores\tTop Motif Percentiles\tTop Motif Totals\n");

    for (site, assignment) in sites.iter().zip(assignments) {
        let _ = write!(out, "{}\t{}", site.window, site.weight);
        for label in &site.labels {
            let _ = write!(out, "\t{}", label.as_str());
        }

        let mut kinases = String::new();
        let mut scores = String::new();
        let mut percentiles = String::new();
        let mut totals = String::new();
        for (i, hit) in assignment.hits.iter().enumerate() {
            if i > 0 {
                kinases.push(';');
                scores.push(';');
                percentiles.push(';');
                totals.push(';');
            }
            kinases.push_str(refs.kinase_name(hit.kinase));
            let _ = write!(scores, "{:.3}", hit.score);
            let _ = write!(percentiles, "{:.3}", hit.percentile);
            let _ = write!(totals, "{:.3}", hit.total);
        }
        let _ = write!(out, "\t{}\t{}\t{}\t{}\n", kinases, scores, percentiles, totals);
    }

    out
}
