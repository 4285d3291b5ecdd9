use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::Parser;

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kinomotif_main_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = File::create(path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
}

fn parse_run(argv: &[&str]) -> RunArgs {
    let cli = Cli::parse_from(argv);
    match cli.command {
        Command::Run(args) => args,
    }
}

fn base_argv(dir: &Path, out: &Path) -> Vec<String> {
    vec![
        "kinomotif".to_string(),
        "run".to_string(),
        "--input".to_string(),
        dir.join("input.json").display().to_string(),
        "--odds".to_string(),
        dir.join("odds.tsv").display().to_string(),
        "--quantiles".to_string(),
        dir.join("quantiles.tsv").display().to_string(),
        "--out".to_string(),
        out.display().to_string(),
    ]
}

fn write_fixture(dir: &Path) {
    write_file(
        &dir.join("odds.tsv"),
        "Kinase\tPosition\tAA\tOdds Ratio\nK1\t0\tB\t2.0\nK2\t0\tC\t2.0\n",
    );
    write_file(
        &dir.join("quantiles.tsv"),
        "Score\tK1\tK2\n0.0\t0.0\t0.0\n1.0\t0.5\t0.5\n2.0\t1.0\t1.0\n",
    );
    write_file(
        &dir.join("input.json"),
        r#"{
            "experiments": ["EGF"],
            "peptides": [
                {"windows": "aBa", "regulations": ["up"]},
                {"windows": "aCa", "regulations": ["up"]},
                {"windows": "aBc", "regulations": ["down"]},
                {"windows": "aAa", "regulations": ["not"]},
                {"windows": "aAc", "regulations": ["not"]}
            ]
        }"#,
    );
}

#[test]
fn test_parse_args_defaults() {
    let dir = make_temp_dir();
    let out = dir.join("out");
    let argv = base_argv(&dir, &out);
    let args = parse_run(&argv.iter().map(String::as_str).collect::<Vec<_>>());

    let params = args.params();
    assert_eq!(params.motif_half_width, 5);
    assert_eq!(params.top_n, 15);
    assert_eq!(params.threshold, f64::NEG_INFINITY);
    assert_eq!(params.threshold_type, Metric::Percentile);
    assert_eq!(params.sort_type, Metric::Percentile);
    assert_eq!(params.alpha, 0.05);
    assert!(params.validate().is_ok());
    assert!(!args.write_sites);
}

#[test]
fn test_parse_args_rejects_unknown_metric() {
    let dir = make_temp_dir();
    let out = dir.join("out");
    let mut argv = base_argv(&dir, &out);
    argv.push("--sort-type".to_string());
    argv.push("rank".to_string());

    let parsed = Cli::try_parse_from(argv.iter().map(String::as_str));
    assert!(parsed.is_err());
}

#[test]
fn test_invalid_params_fail_before_loading() {
    let dir = make_temp_dir();
    let out = dir.join("out");
    let mut argv = base_argv(&dir, &out);
    argv.push("--alpha".to_string());
    argv.push("2.0".to_string());
    let args = parse_run(&argv.iter().map(String::as_str).collect::<Vec<_>>());

    // No reference files exist in the directory; the configuration error
    // must win regardless.
    assert!(matches!(run(&args), Err(RunError::Config(_))));
}

#[test]
fn test_run_end_to_end_and_deterministic() {
    let dir = make_temp_dir();
    write_fixture(&dir);

    let mut outputs = Vec::new();
    for name in ["out_a", "out_b"] {
        let out = dir.join(name);
        let mut argv = base_argv(&dir, &out);
        argv.push("--motif-width".to_string());
        argv.push("1".to_string());
        let args = parse_run(&argv.iter().map(String::as_str).collect::<Vec<_>>());
        run(&args).unwrap();

        let tsv = fs::read_to_string(out.join("motif_enrichment_result.tsv")).unwrap();
        let json = fs::read_to_string(out.join("motif_enrichment_result.json")).unwrap();
        outputs.push((tsv, json));
    }

    // identical input + references => byte-identical output
    assert_eq!(outputs[0], outputs[1]);

    let (tsv, json) = &outputs[0];
    let header = tsv.lines().next().unwrap();
    assert_eq!(
        header,
        "Kinase\tup (EGF)\tdown (EGF)\tnot (EGF)\t-log10 p-value (EGF)\
         \tlog2 odds ratio (EGF)\t-log10 p-value adjusted (EGF)"
    );
    let rows: Vec<&str> = tsv.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("K1\t"));
    assert!(rows[1].starts_with("K2\t"));

    // Every labeled site keeps both kinases as candidates (no threshold),
    // so each kinase carries the full weighted counts.
    let fields: Vec<&str> = rows[0].split('\t').collect();
    assert_eq!(fields[1], "2");
    assert_eq!(fields[2], "1");
    assert_eq!(fields[3], "2");

    let parsed: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["Kinase"], "K1");
}

#[test]
fn test_run_writes_site_table_on_request() {
    let dir = make_temp_dir();
    write_fixture(&dir);
    let out = dir.join("out");

    let mut argv = base_argv(&dir, &out);
    argv.push("--motif-width".to_string());
    argv.push("1".to_string());
    argv.push("--write-sites".to_string());
    let args = parse_run(&argv.iter().map(String::as_str).collect::<Vec<_>>());
    run(&args).unwrap();

    let sites = fs::read_to_string(out.join("site_assignments.tsv")).unwrap();
    let lines: Vec<&str> = sites.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("window\tweight\tEGF\tTop Motif Kinases"));
    // "aBa" scores K1 (log2 2.0 = 1, percentile 0.5) ahead of the neutral K2
    assert!(lines[1].contains("K1;K2"));
    assert!(lines[1].contains("1.000;0.000"));
}
