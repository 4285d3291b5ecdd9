mod input;
mod model;
mod pipeline;
mod reference;
mod report;
mod stats;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::input::InputError;
use crate::model::{ConfigError, EnrichmentParams, EnrichmentRecord, Metric};
use crate::pipeline::{stage1_sites, stage2_score, stage3_rank};
use crate::reference::{ReferenceError, ReferenceStore};
use crate::report::OutputFormat;

/// Motif-based kinase activity enrichment from regulated phosphosites.
#[derive(Parser, Debug)]
#[command(name = "kinomotif", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score sites against the kinase motif references and test
    /// per-kinase enrichment in every experiment
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON request: experiments plus peptides with windows and calls
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Positional odds-ratio table (TSV, optionally gzipped)
    #[arg(long, value_name = "FILE")]
    odds: PathBuf,

    /// Kinase score-quantile matrix (TSV, optionally gzipped)
    #[arg(long, value_name = "FILE")]
    quantiles: PathBuf,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    out: PathBuf,

    /// Motif flank length; windows are 2*width+1 residues
    #[arg(long, default_value_t = 5, value_name = "WIDTH")]
    motif_width: usize,

    /// Keep at most this many kinases per site
    #[arg(long, default_value_t = 15, value_name = "N")]
    top_n: usize,

    /// Keep only kinases whose threshold metric strictly exceeds this
    #[arg(long, default_value_t = f64::NEG_INFINITY)]
    threshold: f64,

    /// Metric the threshold applies to
    #[arg(long, value_enum, default_value = "percentile")]
    threshold_type: Metric,

    /// Metric used to rank kinases per site
    #[arg(long, value_enum, default_value = "percentile")]
    sort_type: Metric,

    /// FDR level for the Benjamini-Hochberg adjustment
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,

    /// Enrichment table format(s) to write
    #[arg(long, value_enum, default_value = "both")]
    format: OutputFormat,

    /// Also write the per-site kinase assignment table
    #[arg(long)]
    write_sites: bool,

    /// Log per-stage detail
    #[arg(long, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only
    #[arg(long)]
    quiet: bool,
}

impl RunArgs {
    fn params(&self) -> EnrichmentParams {
        EnrichmentParams {
            motif_half_width: self.motif_width,
            top_n: self.top_n,
            threshold: self.threshold,
            threshold_type: self.threshold_type,
            sort_type: self.sort_type,
            alpha: self.alpha,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Reference(#[from] ReferenceError),
    #[error("{0}")]
    Input(#[from] InputError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => {
            init_logging(&args);
            if let Err(err) = run(&args) {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn init_logging(args: &RunArgs) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kinomotif={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &RunArgs) -> Result<(), RunError> {
    let params = args.params();
    params.validate()?;

    let refs = ReferenceStore::load(&args.odds, &args.quantiles)?;
    let request = input::load_request(&args.input)?;
    info!(
        experiments = request.experiments.len(),
        peptides = request.peptides.len(),
        "request loaded from {}",
        args.input.display()
    );

    let stage1 = stage1_sites::build_sites(&request);
    info!(
        peptides = stage1.n_peptides,
        sites = stage1.sites.len(),
        dropped_empty = stage1.n_dropped_empty,
        "peptides exploded into sites"
    );

    let wrong_width = stage1
        .sites
        .iter()
        .filter(|site| site.window.len() != params.window_len())
        .count();
    if wrong_width > 0 {
        warn!(
            wrong_width,
            expected = params.window_len(),
            "sites with unexpected window length yield no kinase candidates"
        );
    }

    let odds = stage2_score::odds_by_kinase(&refs);
    let without_odds = odds.iter().filter(|entry| entry.is_none()).count();
    if without_odds > 0 {
        info!(
            without_odds,
            "kinases without positional odds entries score neutrally"
        );
    }

    tracing::debug!(
        top_n = params.top_n,
        threshold = params.threshold,
        threshold_type = params.threshold_type.as_str(),
        sort_type = params.sort_type.as_str(),
        "ranking configuration"
    );
    let assignments: Vec<_> = stage1
        .sites
        .iter()
        .map(|site| {
            let hits = stage2_score::score_site(&site.window, &refs, &odds, &params);
            stage3_rank::rank_hits(hits, &params)
        })
        .collect();
    let unassigned = assignments.iter().filter(|a| a.is_empty()).count();
    if unassigned > 0 {
        info!(unassigned, "sites contribute no kinase evidence");
    }

    let mut per_experiment: Vec<Vec<EnrichmentRecord>> = Vec::new();
    for (e, experiment) in request.experiments.iter().enumerate() {
        let records = pipeline::run_experiment(&stage1.sites, &assignments, e);
        if records.is_empty() {
            warn!(experiment = %experiment, "no kinase evidence; emitting empty columns");
        } else {
            let min_p_adj = 10f64.powf(
                -records
                    .iter()
                    .map(|r| r.neg_log10_p_adj)
                    .fold(f64::NEG_INFINITY, f64::max),
            );
            let rejected = records
                .iter()
                .filter(|r| 10f64.powf(-r.neg_log10_p_adj) <= params.alpha)
                .count();
            info!(
                experiment = %experiment,
                kinases = records.len(),
                rejected,
                min_p_adj,
                "experiment tested"
            );
        }
        per_experiment.push(records);
    }

    let table = report::build_result_table(&refs, &request.experiments, &per_experiment);
    let written = report::write_reports(&table, &args.out, args.format)?;
    for path in &written {
        info!("wrote {}", path.display());
    }

    if args.write_sites {
        let path = report::write_site_table(
            &stage1.sites,
            &assignments,
            &request.experiments,
            &refs,
            &args.out,
        )?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
