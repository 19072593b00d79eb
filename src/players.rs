use crate::record::MatchRecord;

// Goal tally in first-seen order; the fallback tie-break below relies on it.
fn tally_goals(record: &MatchRecord) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    for goal in &record.scorers {
        match counts.iter_mut().find(|(name, _)| *name == goal.player) {
            Some((_, n)) => *n += 1,
            None => counts.push((goal.player.clone(), 1)),
        }
    }
    counts
}

pub fn detect_key_players(record: &MatchRecord) -> Vec<String> {
    let counts = tally_goals(record);

    let mut key_players: Vec<String> = counts
        .iter()
        .filter(|(_, goals)| *goals >= 2)
        .map(|(name, _)| name.clone())
        .collect();

    // Fallback: top scorer when nobody reached two. Strict `>` keeps the
    // first-encountered player on equal tallies.
    if key_players.is_empty() && !counts.is_empty() {
        let mut best = &counts[0];
        for entry in &counts[1..] {
            if entry.1 > best.1 {
                best = entry;
            }
        }
        key_players.push(best.0.clone());
    }

    key_players
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MatchRecord, ScorerEntry};

    fn record_with_scorers(players: &[&str]) -> MatchRecord {
        MatchRecord {
            home_team: "Everton".to_string(),
            away_team: "Fulham".to_string(),
            final_score: None,
            half_time_score: None,
            scorers: players
                .iter()
                .enumerate()
                .map(|(i, p)| ScorerEntry {
                    team: "Everton".to_string(),
                    player: (*p).to_string(),
                    minute: format!("{}", 10 + i * 7),
                })
                .collect(),
            cards: Vec::new(),
            stats: None,
            report: None,
        }
    }

    #[test]
    fn brace_counts_as_key_player() {
        let record = record_with_scorers(&["Alan Shearer", "Les Ferdinand", "Alan Shearer"]);
        assert_eq!(detect_key_players(&record), vec!["Alan Shearer"]);
    }

    #[test]
    fn all_singles_falls_back_to_first_scorer() {
        let record = record_with_scorers(&["A", "B", "C"]);
        assert_eq!(detect_key_players(&record), vec!["A"]);
    }

    #[test]
    fn multiple_braces_keep_scorer_order() {
        let record = record_with_scorers(&["B", "A", "A", "B"]);
        assert_eq!(detect_key_players(&record), vec!["B", "A"]);
    }

    #[test]
    fn no_scorers_means_no_key_players() {
        let record = record_with_scorers(&[]);
        assert!(detect_key_players(&record).is_empty());
    }
}
