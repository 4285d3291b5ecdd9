use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

pub mod odds;
pub mod quantiles;

pub use odds::{KinaseOdds, OddsMatrix};
pub use quantiles::QuantileTable;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid reference table: {0}")]
    Invalid(String),
}

/// Read-only motif reference data, loaded once per process and shared by
/// reference into every request.
#[derive(Debug)]
pub struct ReferenceStore {
    pub odds: OddsMatrix,
    pub quantiles: QuantileTable,
}

impl ReferenceStore {
    pub fn load(odds_path: &Path, quantiles_path: &Path) -> Result<ReferenceStore, ReferenceError> {
        let quantiles = quantiles::read_quantile_table(quantiles_path)?;
        let odds = odds::read_odds_matrix(odds_path)?;

        tracing::info!(
            kinases = quantiles.n_kinases(),
            knots = quantiles.n_knots(),
            odds_kinases = odds.n_kinases(),
            odds_entries = odds.n_entries(),
            "reference tables loaded"
        );

        Ok(ReferenceStore { odds, quantiles })
    }

    pub fn kinases(&self) -> &[String] {
        self.quantiles.kinases()
    }

    pub fn kinase_name(&self, kinase: u32) -> &str {
        &self.quantiles.kinases()[kinase as usize]
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, std::io::Error> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
