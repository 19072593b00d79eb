use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use epl_digest::dataset;
use epl_digest::evaluation::{EvaluationReport, run_full_evaluation};
use epl_digest::export::export_evaluation;

const DEFAULT_INPUT: &str = "output/test_processed.json";
const DEFAULT_REPORT: &str = "output/evaluation_report.json";

fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let input = flag_value(&args, "--input")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let report_path = flag_value(&args, "--report")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT));
    let xlsx_path = flag_value(&args, "--xlsx").map(PathBuf::from);

    let entries = dataset::load_processed(&input)
        .with_context(|| format!("load processed records from {}", input.display()))?;

    let report = run_full_evaluation(&entries);

    println!("Evaluation complete ({} entries)", report.entries);
    println!(
        "ROUGE: rouge1={:.4} rouge2={:.4} rougeL={:.4}",
        report.rouge.rouge1, report.rouge.rouge2, report.rouge.rouge_l
    );
    println!("Event coverage: {:.4}", report.event_coverage);
    println!("Hallucination rate: {:.4}", report.hallucination_rate);

    save_report(&report_path, &report)?;
    println!("Report: {}", report_path.display());

    if let Some(xlsx_path) = xlsx_path {
        export_evaluation(&xlsx_path, &report, &entries)?;
        println!("Workbook: {}", xlsx_path.display());
    }

    Ok(())
}

fn save_report(path: &Path, report: &EvaluationReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(report).context("serialize evaluation report")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
