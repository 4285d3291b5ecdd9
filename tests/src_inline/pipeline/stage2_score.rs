use super::*;
use crate::model::EnrichmentParams;
use crate::reference::{OddsMatrix, QuantileTable, ReferenceStore};

// Odds for "K1" at offsets -1..1 for residues A, B, C, all 2.0; quantile
// knots (0, 0.0), (1, 0.5), (2, 1.0).
fn scenario_refs() -> ReferenceStore {
    let mut entries = Vec::new();
    for position in [-1i8, 0, 1] {
        for residue in [b'A', b'B', b'C'] {
            entries.push(("K1", position, residue, 2.0));
        }
    }
    ReferenceStore {
        odds: OddsMatrix::from_entries(&entries),
        quantiles: QuantileTable::from_parts(
            vec!["K1".to_string()],
            vec![0.0, 1.0, 2.0],
            vec![vec![0.0, 0.5, 1.0]],
        ),
    }
}

fn params_m1() -> EnrichmentParams {
    EnrichmentParams {
        motif_half_width: 1,
        ..EnrichmentParams::default()
    }
}

#[test]
fn test_scenario_scoring() {
    let refs = scenario_refs();
    let odds = odds_by_kinase(&refs);
    let params = params_m1();

    // Lowercase flanks miss the matrix (neutral); only the center B hits.
    let hits = score_site("aBa", &refs, &odds, &params);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].kinase, 0);
    assert!((hits[0].score - 1.0).abs() < 1e-12);
    assert!((hits[0].percentile - 0.5).abs() < 1e-12);
    assert!((hits[0].total - 0.5).abs() < 1e-12);
}

#[test]
fn test_full_window_product() {
    let refs = scenario_refs();
    let odds = odds_by_kinase(&refs);
    let params = params_m1();

    // All three offsets hit: product 8, log2 = 3, clamped to the top knot.
    let hits = score_site("ABC", &refs, &odds, &params);
    assert!((hits[0].score - 3.0).abs() < 1e-12);
    assert!((hits[0].percentile - 1.0).abs() < 1e-12);
    assert!((hits[0].total - 3.0).abs() < 1e-12);
}

#[test]
fn test_phosphotyrosine_short_circuit() {
    let refs = scenario_refs();
    let odds = odds_by_kinase(&refs);
    let params = params_m1();

    assert!(score_site("AyA", &refs, &odds, &params).is_empty());
    assert!(score_site("ByC", &refs, &odds, &params).is_empty());
}

#[test]
fn test_degenerate_windows_yield_no_candidates() {
    let refs = scenario_refs();
    let odds = odds_by_kinase(&refs);
    let params = params_m1();

    assert!(score_site("", &refs, &odds, &params).is_empty());
    assert!(score_site("AB", &refs, &odds, &params).is_empty());
    assert!(score_site("ABCD", &refs, &odds, &params).is_empty());
}

#[test]
fn test_kinase_without_odds_scores_neutrally() {
    let refs = ReferenceStore {
        odds: OddsMatrix::from_entries(&[("K1", 0, b'B', 4.0)]),
        quantiles: QuantileTable::from_parts(
            vec!["K1".to_string(), "K2".to_string()],
            vec![-1.0, 0.0, 2.0],
            vec![vec![0.0, 0.25, 1.0], vec![0.0, 0.75, 1.0]],
        ),
    };
    let odds = odds_by_kinase(&refs);
    let params = params_m1();

    let hits = score_site("aBa", &refs, &odds, &params);
    assert_eq!(hits.len(), 2);
    // candidates stay in kinase enumeration order
    assert_eq!(hits[0].kinase, 0);
    assert_eq!(hits[1].kinase, 1);
    // K2 has no odds entries: raw score 0, percentile straight off the grid
    assert_eq!(hits[1].score, 0.0);
    assert!((hits[1].percentile - 0.75).abs() < 1e-12);
    assert_eq!(hits[1].total, 0.0);
}
