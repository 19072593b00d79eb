use std::collections::HashMap;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::process::ProcessedMatchRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RougeScores {
    pub rouge1: f64,
    pub rouge2: f64,
    pub rouge_l: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub entries: usize,
    pub rouge: RougeScores,
    pub event_coverage: f64,
    pub hallucination_rate: f64,
    pub generated_at: String,
}

fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

// The summary under evaluation: the hybrid output, or the raw abstractive
// summary when the hybrid is empty.
fn summary_of(entry: &ProcessedMatchRecord) -> &str {
    if entry.hybrid_summary.trim().is_empty() {
        &entry.raw_summary
    } else {
        &entry.hybrid_summary
    }
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts: HashMap<&[String], usize> = HashMap::new();
    if tokens.len() >= n && n > 0 {
        for gram in tokens.windows(n) {
            *counts.entry(gram).or_insert(0) += 1;
        }
    }
    counts
}

fn f_measure(overlap: usize, candidate_total: usize, reference_total: usize) -> f64 {
    if candidate_total == 0 || reference_total == 0 || overlap == 0 {
        return 0.0;
    }
    let precision = overlap as f64 / candidate_total as f64;
    let recall = overlap as f64 / reference_total as f64;
    2.0 * precision * recall / (precision + recall)
}

pub fn rouge_n(reference: &[String], candidate: &[String], n: usize) -> f64 {
    let ref_counts = ngram_counts(reference, n);
    let cand_counts = ngram_counts(candidate, n);

    let overlap: usize = cand_counts
        .iter()
        .map(|(gram, count)| (*count).min(ref_counts.get(gram).copied().unwrap_or(0)))
        .sum();
    let cand_total: usize = cand_counts.values().sum();
    let ref_total: usize = ref_counts.values().sum();
    f_measure(overlap, cand_total, ref_total)
}

pub fn rouge_l(reference: &[String], candidate: &[String]) -> f64 {
    let lcs = lcs_len(reference, candidate);
    f_measure(lcs, candidate.len(), reference.len())
}

fn lcs_len(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    // One rolling row is enough; reports are short.
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for item_a in a {
        for (j, item_b) in b.iter().enumerate() {
            curr[j + 1] = if item_a == item_b {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

pub fn evaluate_rouge(entries: &[ProcessedMatchRecord]) -> RougeScores {
    let mut r1 = Vec::new();
    let mut r2 = Vec::new();
    let mut rl = Vec::new();

    for entry in entries {
        let reference = tokenize(&entry.raw_text);
        let candidate = tokenize(summary_of(entry));
        if reference.is_empty() || candidate.is_empty() {
            continue;
        }
        r1.push(rouge_n(&reference, &candidate, 1));
        r2.push(rouge_n(&reference, &candidate, 2));
        rl.push(rouge_l(&reference, &candidate));
    }

    RougeScores {
        rouge1: round4(mean(&r1)),
        rouge2: round4(mean(&r2)),
        rouge_l: round4(mean(&rl)),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

// At least one extracted event string shows up in the summary.
pub fn covers_events(entry: &ProcessedMatchRecord) -> bool {
    let summary = normalize(summary_of(entry));
    entry
        .events
        .iter()
        .any(|event| summary.contains(&normalize(event)))
}

pub fn event_coverage(entries: &[ProcessedMatchRecord]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let covered = entries.iter().filter(|e| covers_events(e)).count();
    round4(covered as f64 / entries.len() as f64)
}

static CANDIDATE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").expect("name pattern compiles"));

// Capitalized two-word names in the summary that never appeared among the
// source PERSON entities.
pub fn hallucinated_names(entry: &ProcessedMatchRecord) -> Vec<String> {
    let known: Vec<String> = entry
        .entities
        .iter()
        .filter(|e| e.label == "PERSON")
        .map(|e| normalize(&e.name))
        .collect();

    let mut hallucinated: Vec<String> = Vec::new();
    for m in CANDIDATE_NAME.find_iter(summary_of(entry)) {
        let name = m.as_str();
        if known.contains(&normalize(name)) {
            continue;
        }
        if hallucinated.iter().any(|h| h == name) {
            continue;
        }
        hallucinated.push(name.to_string());
    }
    hallucinated
}

pub fn hallucination_rate(entries: &[ProcessedMatchRecord]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let flagged = entries
        .iter()
        .filter(|e| !hallucinated_names(e).is_empty())
        .count();
    round4(flagged as f64 / entries.len() as f64)
}

pub fn run_full_evaluation(entries: &[ProcessedMatchRecord]) -> EvaluationReport {
    EvaluationReport {
        entries: entries.len(),
        rouge: evaluate_rouge(entries),
        event_coverage: event_coverage(entries),
        hallucination_rate: hallucination_rate(entries),
        generated_at: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Entity;

    fn entry(raw_text: &str, summary: &str) -> ProcessedMatchRecord {
        ProcessedMatchRecord {
            match_label: "A vs B".to_string(),
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            match_type: "Draw".to_string(),
            key_players: Vec::new(),
            injuries: Vec::new(),
            events: Vec::new(),
            entities: Vec::new(),
            hybrid_summary: summary.to_string(),
            raw_summary: String::new(),
            raw_text: raw_text.to_string(),
        }
    }

    #[test]
    fn identical_texts_score_perfect_rouge1() {
        let entries = vec![entry("Arsenal won the derby late on", "Arsenal won the derby late on")];
        let scores = evaluate_rouge(&entries);
        assert_eq!(scores.rouge1, 1.0);
        assert_eq!(scores.rouge2, 1.0);
        assert_eq!(scores.rouge_l, 1.0);
    }

    #[test]
    fn disjoint_texts_score_zero() {
        let entries = vec![entry("alpha beta gamma", "delta epsilon zeta")];
        let scores = evaluate_rouge(&entries);
        assert_eq!(scores.rouge1, 0.0);
        assert_eq!(scores.rouge_l, 0.0);
    }

    #[test]
    fn empty_summary_entries_are_skipped() {
        let entries = vec![entry("some reference text", "")];
        let scores = evaluate_rouge(&entries);
        assert_eq!(scores.rouge1, 0.0);
    }

    #[test]
    fn coverage_requires_event_substring() {
        let mut covered = entry("x", "An early goal from Saka settled it");
        covered.events = vec!["early goal from Saka".to_string()];
        let mut missed = entry("x", "A quiet first half");
        missed.events = vec!["late goal".to_string()];
        assert!(covers_events(&covered));
        assert!(!covers_events(&missed));
        assert_eq!(event_coverage(&[covered, missed]), 0.5);
    }

    #[test]
    fn unknown_names_are_hallucinations() {
        let mut e = entry("x", "John Smith impressed while Jane Doe watched");
        e.entities = vec![Entity {
            name: "John Smith".to_string(),
            label: "PERSON".to_string(),
        }];
        assert_eq!(hallucinated_names(&e), vec!["Jane Doe"]);
        assert_eq!(hallucination_rate(&[e]), 1.0);
    }

    #[test]
    fn lcs_handles_reordering() {
        let reference = tokenize("the quick brown fox");
        let candidate = tokenize("quick fox the");
        // LCS is "quick fox" (length 2).
        assert_eq!(lcs_len(&reference, &candidate), 2);
    }
}
