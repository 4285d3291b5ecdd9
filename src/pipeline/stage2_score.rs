use crate::model::{EnrichmentParams, KinaseHit};
use crate::reference::{KinaseOdds, ReferenceStore};

// Lowercase center residue marking a phosphotyrosine site. The reference
// matrices model serine/threonine motifs only.
const PHOSPHO_TYROSINE: u8 = b'y';

/// Resolves the odds lookup per kinase once, in quantile-table column
/// order. Kinases without any odds entries score neutrally.
pub fn odds_by_kinase<'a>(refs: &'a ReferenceStore) -> Vec<Option<&'a KinaseOdds>> {
    refs.kinases()
        .iter()
        .map(|name| refs.odds.kinase(name))
        .collect()
}

/// Scores one window against every kinase, returning candidates in kinase
/// enumeration order. Windows of the wrong width and phosphotyrosine
/// windows yield no candidates.
pub fn score_site(
    window: &str,
    refs: &ReferenceStore,
    odds: &[Option<&KinaseOdds>],
    params: &EnrichmentParams,
) -> Vec<KinaseHit> {
    let bytes = window.as_bytes();
    if bytes.len() != params.window_len() {
        return Vec::new();
    }
    let half_width = params.motif_half_width;
    if bytes[half_width] == PHOSPHO_TYROSINE {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for (k, kinase_odds) in odds.iter().copied().enumerate() {
        let product = match kinase_odds {
            Some(kinase_odds) => window_product(bytes, half_width, kinase_odds),
            None => 1.0,
        };
        if product <= 0.0 {
            continue;
        }
        let score = product.log2();
        let percentile = refs.quantiles.percentile(k, score);
        hits.push(KinaseHit {
            kinase: k as u32,
            score,
            percentile,
            total: score * percentile,
        });
    }
    hits
}

fn window_product(bytes: &[u8], half_width: usize, odds: &KinaseOdds) -> f64 {
    let mut product = 1.0f64;
    for (i, &residue) in bytes.iter().enumerate() {
        let offset = (i as isize - half_width as isize) as i8;
        product *= odds.get(&(offset, residue)).copied().unwrap_or(1.0);
    }
    product
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
