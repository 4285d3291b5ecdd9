use std::cmp::Ordering;

/// Benjamini-Hochberg adjusted p-values, returned in the input order.
///
/// Ascending-sorted p-values are scaled by `n / rank`, then a cumulative
/// minimum is taken from the largest rank down and the result is capped
/// at 1.
pub fn benjamini_hochberg(pvals: &[f64]) -> Vec<f64> {
    let n = pvals.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| pvals[i].partial_cmp(&pvals[j]).unwrap_or(Ordering::Equal));

    let mut adjusted = vec![0.0f64; n];
    let mut running_min = 1.0f64;
    for rank in (0..n).rev() {
        let idx = order[rank];
        let scaled = pvals[idx] * n as f64 / (rank + 1) as f64;
        running_min = running_min.min(scaled);
        adjusted[idx] = running_min;
    }
    adjusted
}
