use crate::players::detect_key_players;
use crate::record::MatchRecord;
use crate::stats::stat_values;

// Raw strings straight from the stat table; a clause is dropped when either
// side is missing or empty.
fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

// Sentence 1 always reads "{home} beat {away} {hg}-{ag}." even for draws;
// callers are expected to hand in matches with a winner. See DESIGN.md.
pub fn build_template_summary(record: &MatchRecord) -> String {
    let (home_goals, away_goals) = match record.final_score.as_ref() {
        Some(score) => (score.home.as_str(), score.away.as_str()),
        None => ("", ""),
    };

    let (xg_home, xg_away) = stat_values(record.stats.as_ref(), "XG");
    let (shots_home, shots_away) = stat_values(record.stats.as_ref(), "Shots On Target");

    let key_players = detect_key_players(record);

    let sentence_1 = format!(
        "{} beat {} {}-{}.",
        record.home_team, record.away_team, home_goals, away_goals
    );

    let mut sentence_2_parts: Vec<String> = Vec::new();

    match key_players.as_slice() {
        [] => {}
        [only] => {
            sentence_2_parts.push(format!("{only} was the standout performer."));
        }
        [rest @ .., last] => {
            sentence_2_parts.push(format!(
                "Key contributions came from {} and {}.",
                rest.join(", "),
                last
            ));
        }
    }

    if present(xg_home) && present(xg_away) {
        sentence_2_parts.push(format!(
            "They led on xG ({} vs {}).",
            xg_home.unwrap_or_default(),
            xg_away.unwrap_or_default()
        ));
    }

    if present(shots_home) && present(shots_away) {
        sentence_2_parts.push(format!(
            "Shots on target finished {} to {}.",
            shots_home.unwrap_or_default(),
            shots_away.unwrap_or_default()
        ));
    }

    let sentence_2 = sentence_2_parts.join(" ");

    // The single joining space stays even when sentence 2 is empty.
    format!("{sentence_1} {sentence_2}")
}
