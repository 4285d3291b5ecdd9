use std::collections::HashMap;
use std::path::Path;

use crate::reference::{ReferenceError, open_maybe_gz};

/// Positional odds ratios of one kinase, keyed by (offset, residue).
/// Lookups for absent keys are neutral (1.0).
pub type KinaseOdds = HashMap<(i8, u8), f64>;

/// The full positional odds-ratio table: kinase -> (offset, residue) -> odds.
#[derive(Debug, Default)]
pub struct OddsMatrix {
    by_kinase: HashMap<String, KinaseOdds>,
    n_entries: usize,
}

impl OddsMatrix {
    pub fn kinase(&self, name: &str) -> Option<&KinaseOdds> {
        self.by_kinase.get(name)
    }

    pub fn n_kinases(&self) -> usize {
        self.by_kinase.len()
    }

    pub fn n_entries(&self) -> usize {
        self.n_entries
    }

    #[cfg(test)]
    pub fn from_entries(entries: &[(&str, i8, u8, f64)]) -> OddsMatrix {
        let mut matrix = OddsMatrix::default();
        for &(kinase, position, residue, odds) in entries {
            matrix
                .by_kinase
                .entry(kinase.to_string())
                .or_default()
                .insert((position, residue), odds);
            matrix.n_entries += 1;
        }
        matrix
    }
}

/// Reads the tab-separated odds table. Expected columns (by header name):
/// `Kinase`, `Position`, `AA`, `Odds Ratio`. Duplicate (kinase, position,
/// residue) rows keep the last value.
pub fn read_odds_matrix(path: &Path) -> Result<OddsMatrix, ReferenceError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();

    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(ReferenceError::Invalid("odds table is empty".to_string()));
    }
    let header: Vec<&str> = buf.trim_end().split('\t').collect();
    let col_kinase = find_column(&header, "Kinase")?;
    let col_position = find_column(&header, "Position")?;
    let col_aa = find_column(&header, "AA")?;
    let col_odds = find_column(&header, "Odds Ratio")?;
    let n_cols = header.len();

    let mut matrix = OddsMatrix::default();
    let mut line_no = 1usize;
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end();
        if line.is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() != n_cols {
            return Err(ReferenceError::Parse(format!(
                "odds table line {}: expected {} columns, got {}",
                line_no,
                n_cols,
                cols.len()
            )));
        }

        let kinase = cols[col_kinase].trim();
        if kinase.is_empty() {
            return Err(ReferenceError::Parse(format!(
                "odds table line {}: empty kinase name",
                line_no
            )));
        }

        let position: i32 = cols[col_position].trim().parse().map_err(|_| {
            ReferenceError::Parse(format!(
                "odds table line {}: invalid position {:?}",
                line_no, cols[col_position]
            ))
        })?;
        let position = i8::try_from(position).map_err(|_| {
            ReferenceError::Parse(format!(
                "odds table line {}: position {} out of range",
                line_no, position
            ))
        })?;

        let aa = cols[col_aa].trim();
        let residue = match aa.as_bytes() {
            [b] => *b,
            _ => {
                return Err(ReferenceError::Parse(format!(
                    "odds table line {}: residue {:?} is not a single character",
                    line_no, aa
                )));
            }
        };

        let odds: f64 = cols[col_odds].trim().parse().map_err(|_| {
            ReferenceError::Parse(format!(
                "odds table line {}: invalid odds ratio {:?}",
                line_no, cols[col_odds]
            ))
        })?;
        if !(odds.is_finite() && odds > 0.0) {
            return Err(ReferenceError::Invalid(format!(
                "odds table line {}: odds ratio must be a positive real, got {}",
                line_no, odds
            )));
        }

        matrix
            .by_kinase
            .entry(kinase.to_string())
            .or_default()
            .insert((position, residue), odds);
        matrix.n_entries += 1;
    }

    if matrix.by_kinase.is_empty() {
        return Err(ReferenceError::Invalid(
            "odds table has no data rows".to_string(),
        ));
    }

    Ok(matrix)
}

fn find_column(header: &[&str], name: &str) -> Result<usize, ReferenceError> {
    header
        .iter()
        .position(|col| col.trim() == name)
        .ok_or_else(|| ReferenceError::Invalid(format!("odds table is missing column {:?}", name)))
}

#[cfg(test)]
#[path = "../../tests/src_inline/reference/odds.rs"]
mod tests;
