use std::fmt::Write;

use crate::report::{EXPERIMENT_COLUMNS, ResultTable, record_values};

pub fn render_enrichment_tsv(table: &ResultTable) -> String {
    let mut out = String::new();

    out.push_str("Kinase");
    for experiment in &table.experiments {
        for column in EXPERIMENT_COLUMNS {
            let _ = write!(out, "\t{} ({})", column, experiment);
        }
    }
    out.push('\n');

    for (row, kinase) in table.kinases.iter().enumerate() {
        out.push_str(kinase);
        for cell in &table.cells[row] {
            match cell {
                Some(record) => {
                    for value in record_values(record) {
                        let _ = write!(out, "\t{}", value);
                    }
                }
                None => {
                    for _ in EXPERIMENT_COLUMNS {
                        out.push_str("\tNA");
                    }
                }
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tsv.rs"]
mod tests;
