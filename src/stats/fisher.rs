use statrs::distribution::{DiscreteCDF, Hypergeometric};

/// 2x2 contingency table with weighted (real-valued) cells.
///
/// ```text
///                     outcome
///                   yes  |  no
///   in group   ||    a   |   b
///   rest       ||    c   |   d
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table2x2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Table2x2 {
    /// Negative inputs can only arise from floating-point cancellation in
    /// the margin subtractions; they are clamped back to zero.
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Table2x2 {
        Table2x2 {
            a: a.max(0.0),
            b: b.max(0.0),
            c: c.max(0.0),
            d: d.max(0.0),
        }
    }

    /// Haldane correction: one added to every cell if any cell is zero.
    pub fn haldane_corrected(self) -> Table2x2 {
        if self.a == 0.0 || self.b == 0.0 || self.c == 0.0 || self.d == 0.0 {
            Table2x2 {
                a: self.a + 1.0,
                b: self.b + 1.0,
                c: self.c + 1.0,
                d: self.d + 1.0,
            }
        } else {
            self
        }
    }

    /// Sample odds ratio `(a*d)/(b*c)`.
    pub fn odds_ratio(&self) -> f64 {
        (self.a * self.d) / (self.b * self.c)
    }

    pub fn log2_odds_ratio(&self) -> f64 {
        self.odds_ratio().log2()
    }

    pub fn min_cell(&self) -> f64 {
        self.a.min(self.b).min(self.c).min(self.d)
    }

    fn as_counts(&self) -> [u64; 4] {
        [
            cell_to_count(self.a),
            cell_to_count(self.b),
            cell_to_count(self.c),
            cell_to_count(self.d),
        ]
    }
}

// Integer projection for the exact test: round half away from zero and
// keep every cell at 1 or more, matching the corrected-table invariant.
fn cell_to_count(v: f64) -> u64 {
    let rounded = v.round();
    if rounded < 1.0 { 1 } else { rounded as u64 }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisherGreater {
    pub statistic: f64,
    pub pvalue: f64,
}

/// One-sided ("greater") Fisher exact test.
///
/// The p-value is the hypergeometric upper tail `P[X >= a]` on the integer
/// projection of the table; the statistic is the sample odds ratio of the
/// table as given. Call on a Haldane-corrected table.
pub fn fisher_exact_greater(table: &Table2x2) -> FisherGreater {
    debug_assert!(table.min_cell() > 0.0, "expects a corrected table");
    let statistic = table.odds_ratio();

    let [a, b, c, d] = table.as_counts();
    let population = a + b + c + d;
    let successes = a + b;
    let draws = a + c;
    let hyper = Hypergeometric::new(population, successes, draws)
        .expect("table margins are bounded by the table total");

    // sf computes "more than a - 1", i.e. "a or more".
    let pvalue = hyper.sf(a - 1);

    FisherGreater { statistic, pvalue }
}
