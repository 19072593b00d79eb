use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

// Category name -> ordered stat rows, as scraped from the match page.
// BTreeMap keeps category iteration deterministic across runs.
pub type StatsTable = BTreeMap<String, Vec<StatRow>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreLine {
    pub home: String,
    pub away: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerEntry {
    pub team: String,
    pub player: String,
    pub minute: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardEntry {
    pub team: String,
    pub event: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRow {
    pub stat: String,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub final_score: Option<ScoreLine>,
    #[serde(default)]
    pub half_time_score: Option<ScoreLine>,
    #[serde(default)]
    pub scorers: Vec<ScorerEntry>,
    #[serde(default)]
    pub cards: Vec<CardEntry>,
    #[serde(default)]
    pub stats: Option<StatsTable>,
    #[serde(default)]
    pub report: Option<String>,
}

impl MatchRecord {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    pub fn report_text(&self) -> &str {
        self.report.as_deref().unwrap_or("")
    }

    // A missing or non-numeric final score fails the record outright; it must
    // never read as 0-0.
    pub fn final_goals(&self) -> Result<(u32, u32)> {
        let score = self
            .final_score
            .as_ref()
            .ok_or_else(|| anyhow!("missing final score for {}", self.label()))?;
        let home = parse_goals(&score.home)
            .with_context(|| format!("bad home score {:?} for {}", score.home, self.label()))?;
        let away = parse_goals(&score.away)
            .with_context(|| format!("bad away score {:?} for {}", score.away, self.label()))?;
        Ok((home, away))
    }
}

fn parse_goals(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty score"));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| anyhow!("score is not a non-negative integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_score(home: &str, away: &str) -> MatchRecord {
        MatchRecord {
            home_team: "Arsenal".to_string(),
            away_team: "Chelsea".to_string(),
            final_score: Some(ScoreLine {
                home: home.to_string(),
                away: away.to_string(),
            }),
            half_time_score: None,
            scorers: Vec::new(),
            cards: Vec::new(),
            stats: None,
            report: None,
        }
    }

    #[test]
    fn final_goals_parses_plain_integers() {
        let record = record_with_score("3", "1");
        assert_eq!(record.final_goals().unwrap(), (3, 1));
    }

    #[test]
    fn final_goals_rejects_garbage() {
        let record = record_with_score("three", "1");
        let err = record.final_goals().unwrap_err().to_string();
        assert!(err.contains("Arsenal vs Chelsea"));
    }

    #[test]
    fn final_goals_rejects_missing_score() {
        let mut record = record_with_score("1", "1");
        record.final_score = None;
        assert!(record.final_goals().is_err());
    }

    #[test]
    fn final_goals_rejects_empty_string() {
        let record = record_with_score("", "2");
        assert!(record.final_goals().is_err());
    }
}
