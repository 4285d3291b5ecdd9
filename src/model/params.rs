use crate::model::Metric;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("motif half-width must be between 1 and 127, got {0}")]
    InvalidMotifWidth(usize),
    #[error("top-n must be at least 1, got {0}")]
    InvalidTopN(usize),
    #[error("alpha must be inside (0, 1), got {0}")]
    InvalidAlpha(f64),
    #[error("threshold must not be NaN")]
    ThresholdNan,
}

/// Request-level tuning knobs. Defaults reproduce the reference tool:
/// +/-5 windows, top 15 kinases per site, no threshold filtering,
/// percentile for both ranking and filtering, FDR at 0.05.
#[derive(Debug, Clone)]
pub struct EnrichmentParams {
    pub motif_half_width: usize,
    pub top_n: usize,
    pub threshold: f64,
    pub threshold_type: Metric,
    pub sort_type: Metric,
    pub alpha: f64,
}

impl Default for EnrichmentParams {
    fn default() -> Self {
        EnrichmentParams {
            motif_half_width: 5,
            top_n: 15,
            threshold: f64::NEG_INFINITY,
            threshold_type: Metric::Percentile,
            sort_type: Metric::Percentile,
            alpha: 0.05,
        }
    }
}

impl EnrichmentParams {
    /// Rejects invalid configurations before any computation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.motif_half_width == 0 || self.motif_half_width > i8::MAX as usize {
            return Err(ConfigError::InvalidMotifWidth(self.motif_half_width));
        }
        if self.top_n == 0 {
            return Err(ConfigError::InvalidTopN(self.top_n));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if self.threshold.is_nan() {
            return Err(ConfigError::ThresholdNan);
        }
        Ok(())
    }

    /// Expected window length: center residue plus the flanks.
    pub fn window_len(&self) -> usize {
        2 * self.motif_half_width + 1
    }
}
