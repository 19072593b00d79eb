use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::events::extract_events;
use crate::injuries::{self, InjuryAttribution};
use crate::narrative::classify_match;
use crate::nlp::{Entity, Nlp};
use crate::players::detect_key_players;
use crate::record::MatchRecord;
use crate::summarize::{hybrid_summary, summarize_report};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMatchRecord {
    #[serde(rename = "match")]
    pub match_label: String,
    pub home_team: String,
    pub away_team: String,
    pub match_type: String,
    pub key_players: Vec<String>,
    pub injuries: Vec<InjuryAttribution>,
    pub events: Vec<String>,
    pub entities: Vec<Entity>,
    pub hybrid_summary: String,
    pub raw_summary: String,
    // Kept verbatim so the evaluation stage has its reference text.
    pub raw_text: String,
}

pub fn process_record(record: &MatchRecord, nlp: &dyn Nlp) -> Result<ProcessedMatchRecord> {
    // Score validation happens first; everything after degrades gracefully.
    let match_type = classify_match(record)?.to_string();

    let raw_text = record.report_text();
    let entities = nlp.entities(raw_text);
    let sentences = nlp.segment(raw_text);
    let flagged = injuries::injury_sentences(&sentences);
    let attributions = injuries::attach_players(&flagged, &entities);

    Ok(ProcessedMatchRecord {
        match_label: record.label(),
        home_team: record.home_team.clone(),
        away_team: record.away_team.clone(),
        match_type,
        key_players: detect_key_players(record),
        injuries: attributions,
        events: extract_events(raw_text),
        entities,
        hybrid_summary: hybrid_summary(nlp, record),
        raw_summary: summarize_report(nlp, raw_text),
        raw_text: raw_text.to_string(),
    })
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub processed: Vec<ProcessedMatchRecord>,
    pub failures: Vec<String>,
}

// Records are independent, so the batch fans out; a bad record becomes a
// labelled failure instead of sinking the run.
pub fn process_batch(records: &[MatchRecord], nlp: &dyn Nlp) -> BatchOutcome {
    let results: Vec<Result<ProcessedMatchRecord, String>> = records
        .par_iter()
        .map(|record| process_record(record, nlp).map_err(|err| format!("{err:#}")))
        .collect();

    let mut outcome = BatchOutcome::default();
    for result in results {
        match result {
            Ok(processed) => outcome.processed.push(processed),
            Err(failure) => outcome.failures.push(failure),
        }
    }
    outcome
}
