use std::fmt::Write;

use crate::report::{EXPERIMENT_COLUMNS, ResultTable, record_values};

/// Renders the merged table as a JSON array of per-kinase records, the
/// shape downstream viewers already consume. Non-finite numbers and
/// missing cells become null.
pub fn render_enrichment_json(table: &ResultTable) -> String {
    let mut out = String::new();
    out.push('[');

    for (row, kinase) in table.kinases.iter().enumerate() {
        if row > 0 {
            out.push(',');
        }
        out.push('{');
        push_kv_str(&mut out, "Kinase", kinase);
        for (e, experiment) in table.experiments.iter().enumerate() {
            let values = table.cells[row][e].as_ref().map(record_values);
            for (c, column) in EXPERIMENT_COLUMNS.iter().enumerate() {
                out.push(',');
                push_str_val(&mut out, &format!("{} ({})", column, experiment));
                out.push(':');
                match values {
                    Some(values) => push_num_val(&mut out, values[c]),
                    None => out.push_str("null"),
                }
            }
        }
        out.push('}');
    }

    out.push(']');
    out
}

fn push_kv_str(out: &mut String, key: &str, value: &str) {
    push_str_val(out, key);
    out.push(':');
    push_str_val(out, value);
}

fn push_num_val(out: &mut String, value: f64) {
    if value.is_finite() {
        let _ = write!(out, "{}", value);
    } else {
        out.push_str("null");
    }
}

fn push_str_val(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
