use serde::{Deserialize, Serialize};

use crate::nlp::Entity;

// Strong signals score 2, the rest 1 each; a sentence needs 2 to be flagged.
const INJURY_TRIGGERS: &[&str] = &[
    "forced off",
    "pulled up",
    "went down",
    "unable to continue",
    "could not continue",
    "limped off",
    "left the field",
    "took a knock",
    "picked up a knock",
    "injury concern",
    "problem for",
    "fitness concern",
    "went straight down",
    "received treatment",
    "required treatment",
];

const MEDICAL_TERMS: &[&str] = &[
    "stretcher",
    "physio",
    "medical staff",
    "treatment",
    "ice pack",
    "bandage",
];

const SUBSTITUTION_PHRASES: &[&str] = &[
    "was replaced by",
    "substituted",
    "came off",
    "forced substitution",
];

const INJURY_SCORE_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryAttribution {
    pub sentence: String,
    pub players: Vec<String>,
}

fn contains_any(sentence_lower: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| sentence_lower.contains(p))
}

// Substring containment, not word boundaries; each lexicon bucket contributes
// at most once per sentence.
pub fn sentence_score(sentence: &str) -> u32 {
    let lower = sentence.to_lowercase();
    let mut score = 0;
    if contains_any(&lower, INJURY_TRIGGERS) {
        score += 2;
    }
    if contains_any(&lower, MEDICAL_TERMS) {
        score += 1;
    }
    if contains_any(&lower, SUBSTITUTION_PHRASES) {
        score += 1;
    }
    score
}

pub fn injury_sentences(sentences: &[String]) -> Vec<String> {
    sentences
        .iter()
        .filter(|sent| sentence_score(sent) >= INJURY_SCORE_THRESHOLD)
        .cloned()
        .collect()
}

pub fn attach_players(sentences: &[String], entities: &[Entity]) -> Vec<InjuryAttribution> {
    let players: Vec<&str> = entities
        .iter()
        .filter(|e| e.label == "PERSON")
        .map(|e| e.name.as_str())
        .collect();

    sentences
        .iter()
        .map(|sent| {
            let involved: Vec<String> = players
                .iter()
                .filter(|p| sent.contains(*p))
                .map(|p| (*p).to_string())
                .collect();
            InjuryAttribution {
                sentence: sent.clone(),
                players: if involved.is_empty() {
                    vec!["Unknown".to_string()]
                } else {
                    involved
                },
            }
        })
        .collect()
}
