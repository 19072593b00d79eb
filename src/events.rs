use once_cell::sync::Lazy;
use regex::Regex;

// Optional minute marker, then a period-free run containing "goal". Matches
// are taken left to right without overlap.
static GOAL_EVENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+'\s*)?([^.]*goal[^.]*)").expect("goal pattern compiles"));

pub fn extract_events(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    GOAL_EVENT
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
