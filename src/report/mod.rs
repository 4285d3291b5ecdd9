use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{EnrichmentRecord, Site, SiteAssignment};
use crate::reference::ReferenceStore;

pub mod json;
pub mod sites;
pub mod tsv;

/// Per-experiment column names, in output order.
pub const EXPERIMENT_COLUMNS: [&str; 6] = [
    "up",
    "down",
    "not",
    "-log10 p-value",
    "log2 odds ratio",
    "-log10 p-value adjusted",
];

/// The merged wide table: one row per kinase, one column group per
/// experiment. A `None` cell means the kinase had no evidence in that
/// experiment.
#[derive(Debug)]
pub struct ResultTable {
    pub experiments: Vec<String>,
    pub kinases: Vec<String>,
    pub cells: Vec<Vec<Option<EnrichmentRecord>>>,
}

/// Outer-joins per-experiment record lists on the kinase name. Kinases are
/// listed in sorted order of the union, which keeps the table independent
/// of input row order.
pub fn build_result_table(
    refs: &ReferenceStore,
    experiments: &[String],
    records: &[Vec<EnrichmentRecord>],
) -> ResultTable {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    for experiment in records {
        for record in experiment {
            names.insert(refs.kinase_name(record.kinase));
        }
    }
    let kinases: Vec<String> = names.into_iter().map(str::to_string).collect();
    let index: HashMap<&str, usize> = kinases
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut cells = vec![vec![None; experiments.len()]; kinases.len()];
    for (e, experiment) in records.iter().enumerate() {
        for record in experiment {
            let row = index[refs.kinase_name(record.kinase)];
            cells[row][e] = Some(record.clone());
        }
    }

    ResultTable {
        experiments: experiments.to_vec(),
        kinases,
        cells,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Tsv,
    Json,
    Both,
}

pub fn write_reports(
    table: &ResultTable,
    out_dir: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>, std::io::Error> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    if matches!(format, OutputFormat::Tsv | OutputFormat::Both) {
        let path = out_dir.join("motif_enrichment_result.tsv");
        fs::write(&path, tsv::render_enrichment_tsv(table))?;
        written.push(path);
    }
    if matches!(format, OutputFormat::Json | OutputFormat::Both) {
        let path = out_dir.join("motif_enrichment_result.json");
        fs::write(&path, json::render_enrichment_json(table))?;
        written.push(path);
    }

    Ok(written)
}

pub fn write_site_table(
    sites_rows: &[Site],
    assignments: &[SiteAssignment],
    experiments: &[String],
    refs: &ReferenceStore,
    out_dir: &Path,
) -> Result<PathBuf, std::io::Error> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join("site_assignments.tsv");
    fs::write(
        &path,
        sites::render_site_table(sites_rows, assignments, experiments, refs),
    )?;
    Ok(path)
}

/// Record cell values in `EXPERIMENT_COLUMNS` order.
pub fn record_values(record: &EnrichmentRecord) -> [f64; 6] {
    [
        record.counts.up,
        record.counts.down,
        record.counts.not,
        record.neg_log10_p,
        record.log2_odds,
        record.neg_log10_p_adj,
    ]
}
