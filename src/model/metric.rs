/// Ranking/filter metric for per-site kinase candidates.
///
/// Percentile is the default for both sorting and thresholding; it tracks
/// the published motif-scoring practice and behaves best on sparse motifs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Metric {
    Score,
    Percentile,
    Total,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Score => "score",
            Metric::Percentile => "percentile",
            Metric::Total => "total",
        }
    }
}
