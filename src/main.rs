use std::path::PathBuf;

use anyhow::{Context, Result};

use epl_digest::dataset;
use epl_digest::nlp::ReportNlp;
use epl_digest::process::{BatchOutcome, process_batch};

const DEFAULT_INPUT: &str = "premier_league_results.json";
const DEFAULT_OUT_DIR: &str = "output";

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let input = flag_value(&args, "--input")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let out_dir = flag_value(&args, "--out-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    let test_size = flag_value(&args, "--test-size")
        .and_then(|val| val.parse::<f64>().ok())
        .or_else(|| env_parse("TEST_SIZE"))
        .unwrap_or(dataset::DEFAULT_TEST_SIZE);
    let seed = flag_value(&args, "--seed")
        .and_then(|val| val.parse::<u64>().ok())
        .or_else(|| env_parse("SPLIT_SEED"))
        .unwrap_or(dataset::DEFAULT_SPLIT_SEED);

    let records = dataset::load_matches(&input)
        .with_context(|| format!("load matches from {}", input.display()))?;
    let (train, test) = dataset::split_records(records, test_size, seed);

    println!("Training entries: {}", train.len());
    println!("Testing entries: {}", test.len());

    let nlp = ReportNlp::from_env();
    if nlp.has_remote() {
        println!("Summarizer: remote endpoint");
    } else {
        println!("Summarizer: offline extractive fallback");
    }

    let train_out = process_batch(&train, &nlp);
    let test_out = process_batch(&test, &nlp);
    report_failures("train", &train_out);
    report_failures("test", &test_out);

    let train_path = out_dir.join("train_processed.json");
    let test_path = out_dir.join("test_processed.json");
    dataset::save_processed(&train_path, &train_out.processed)?;
    dataset::save_processed(&test_path, &test_out.processed)?;

    println!("Saved:");
    println!(" - {}", train_path.display());
    println!(" - {}", test_path.display());
    println!(
        "Processed {} matches ({} skipped)",
        train_out.processed.len() + test_out.processed.len(),
        train_out.failures.len() + test_out.failures.len()
    );

    Ok(())
}

fn report_failures(split: &str, outcome: &BatchOutcome) {
    if outcome.failures.is_empty() {
        return;
    }
    eprintln!("{} split: {} records skipped", split, outcome.failures.len());
    for failure in outcome.failures.iter().take(8) {
        eprintln!(" - {failure}");
    }
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

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|val| val.parse::<T>().ok())
}
