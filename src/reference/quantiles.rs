use std::collections::HashSet;
use std::path::Path;

use crate::reference::{ReferenceError, open_maybe_gz};

/// Per-kinase empirical score->quantile lookup on a shared score grid.
///
/// The grid is strictly ascending; lookups interpolate linearly between
/// the two bracketing knots and clamp to the boundary knot outside the
/// grid on either side.
#[derive(Debug)]
pub struct QuantileTable {
    kinases: Vec<String>,
    scores: Vec<f64>,
    quantiles: Vec<Vec<f64>>,
}

impl QuantileTable {
    pub fn kinases(&self) -> &[String] {
        &self.kinases
    }

    pub fn n_kinases(&self) -> usize {
        self.kinases.len()
    }

    pub fn n_knots(&self) -> usize {
        self.scores.len()
    }

    pub fn percentile(&self, kinase: usize, score: f64) -> f64 {
        let scores = &self.scores;
        let quantiles = &self.quantiles[kinase];

        if score <= scores[0] {
            return quantiles[0];
        }
        let last = scores.len() - 1;
        if score >= scores[last] {
            return quantiles[last];
        }

        let hi = scores.partition_point(|&x| x < score);
        let lo = hi - 1;
        let t = (score - scores[lo]) / (scores[hi] - scores[lo]);
        quantiles[lo] + t * (quantiles[hi] - quantiles[lo])
    }

    #[cfg(test)]
    pub fn from_parts(kinases: Vec<String>, scores: Vec<f64>, quantiles: Vec<Vec<f64>>) -> QuantileTable {
        QuantileTable {
            kinases,
            scores,
            quantiles,
        }
    }
}

/// Reads the tab-separated quantile matrix: a `Score` column holding the
/// grid plus one column per kinase holding that kinase's quantiles.
pub fn read_quantile_table(path: &Path) -> Result<QuantileTable, ReferenceError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();

    let read = reader.read_line(&mut buf)?;
    if read == 0 {
        return Err(ReferenceError::Invalid(
            "quantile table is empty".to_string(),
        ));
    }
    let header: Vec<&str> = buf.trim_end().split('\t').collect();
    if header.first().map(|c| c.trim()) != Some("Score") {
        return Err(ReferenceError::Invalid(
            "quantile table must start with a Score column".to_string(),
        ));
    }
    let kinases: Vec<String> = header[1..]
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    if kinases.is_empty() {
        return Err(ReferenceError::Invalid(
            "quantile table has no kinase columns".to_string(),
        ));
    }
    if kinases.iter().any(|name| name.is_empty()) {
        return Err(ReferenceError::Invalid(
            "quantile table has an empty kinase column name".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for name in &kinases {
        if !seen.insert(name.as_str()) {
            return Err(ReferenceError::Invalid(format!(
                "quantile table has duplicate kinase column {:?}",
                name
            )));
        }
    }

    let mut scores: Vec<f64> = Vec::new();
    let mut quantiles: Vec<Vec<f64>> = vec![Vec::new(); kinases.len()];
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
        if cols.len() != kinases.len() + 1 {
            return Err(ReferenceError::Parse(format!(
                "quantile table line {}: expected {} columns, got {}",
                line_no,
                kinases.len() + 1,
                cols.len()
            )));
        }

        let score: f64 = cols[0].trim().parse().map_err(|_| {
            ReferenceError::Parse(format!(
                "quantile table line {}: invalid score {:?}",
                line_no, cols[0]
            ))
        })?;
        if !score.is_finite() {
            return Err(ReferenceError::Invalid(format!(
                "quantile table line {}: score must be finite",
                line_no
            )));
        }
        if let Some(&prev) = scores.last() {
            if score <= prev {
                return Err(ReferenceError::Invalid(format!(
                    "quantile table line {}: score grid must be strictly ascending ({} after {})",
                    line_no, score, prev
                )));
            }
        }
        scores.push(score);

        for (k, cell) in cols[1..].iter().enumerate() {
            let value: f64 = cell.trim().parse().map_err(|_| {
                ReferenceError::Parse(format!(
                    "quantile table line {}: invalid quantile {:?}",
                    line_no, cell
                ))
            })?;
            if !value.is_finite() {
                return Err(ReferenceError::Invalid(format!(
                    "quantile table line {}: quantile must be finite",
                    line_no
                )));
            }
            quantiles[k].push(value);
        }
    }

    if scores.len() < 2 {
        return Err(ReferenceError::Invalid(format!(
            "quantile table needs at least 2 score knots, got {}",
            scores.len()
        )));
    }

    Ok(QuantileTable {
        kinases,
        scores,
        quantiles,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/reference/quantiles.rs"]
mod tests;
