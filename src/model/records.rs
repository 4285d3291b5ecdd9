use crate::model::Metric;

/// One candidate kinase for one site. `kinase` indexes the reference
/// store's kinase list.
#[derive(Debug, Clone, Copy)]
pub struct KinaseHit {
    pub kinase: u32,
    pub score: f64,
    pub percentile: f64,
    pub total: f64,
}

impl KinaseHit {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Score => self.score,
            Metric::Percentile => self.percentile,
            Metric::Total => self.total,
        }
    }
}

/// Ranked, filtered, truncated kinase candidates of one site.
#[derive(Debug, Clone, Default)]
pub struct SiteAssignment {
    pub hits: Vec<KinaseHit>,
}

impl SiteAssignment {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Weighted evidence per regulation call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LabelWeights {
    pub up: f64,
    pub down: f64,
    pub not: f64,
}

impl LabelWeights {
    pub fn mass(&self) -> f64 {
        self.up + self.down + self.not
    }
}

/// Per-kinase outcome of one experiment's enrichment test.
#[derive(Debug, Clone)]
pub struct EnrichmentRecord {
    pub kinase: u32,
    pub counts: LabelWeights,
    pub neg_log10_p: f64,
    pub log2_odds: f64,
    pub neg_log10_p_adj: f64,
}
