use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::summarize::SummaryEndpoint;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    Timeout,
    RateLimited,
    Http(u16),
    Network(String),
    Parse(String),
}

impl fmt::Display for SummarizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummarizeError::Timeout => write!(f, "summarizer request timed out"),
            SummarizeError::RateLimited => write!(f, "summarizer rate limited"),
            SummarizeError::Http(status) => write!(f, "summarizer returned http {status}"),
            SummarizeError::Network(msg) => write!(f, "summarizer unreachable: {msg}"),
            SummarizeError::Parse(msg) => write!(f, "summarizer response unreadable: {msg}"),
        }
    }
}

impl std::error::Error for SummarizeError {}

// The language services the pipeline leans on. Implementations are injected
// into the processor; callers must treat any summarize error as "use the
// input text unchanged".
pub trait Nlp: Sync {
    fn segment(&self, text: &str) -> Vec<String>;
    fn entities(&self, text: &str) -> Vec<Entity>;
    fn summarize(
        &self,
        text: &str,
        max_words: usize,
        min_words: usize,
    ) -> Result<String, SummarizeError>;
}

// Rule-based services plus an optional remote abstractive endpoint. Without
// an endpoint the summarizer degrades to lead-sentence extraction.
pub struct ReportNlp {
    endpoint: Option<SummaryEndpoint>,
}

impl ReportNlp {
    pub fn offline() -> Self {
        Self { endpoint: None }
    }

    pub fn from_env() -> Self {
        Self {
            endpoint: SummaryEndpoint::from_env(),
        }
    }

    pub fn has_remote(&self) -> bool {
        self.endpoint.is_some()
    }
}

impl Nlp for ReportNlp {
    fn segment(&self, text: &str) -> Vec<String> {
        split_sentences(text)
    }

    fn entities(&self, text: &str) -> Vec<Entity> {
        extract_person_entities(text)
    }

    fn summarize(
        &self,
        text: &str,
        max_words: usize,
        min_words: usize,
    ) -> Result<String, SummarizeError> {
        match self.endpoint.as_ref() {
            Some(endpoint) => endpoint.summarize(text, max_words, min_words),
            None => Ok(extractive_summary(text, max_words)),
        }
    }
}

static PERSON_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?: [A-Z][a-z]+)+\b").expect("person name pattern compiles")
});

// Capitalized multi-word sequences stand in for PERSON spans; first
// occurrence wins, later duplicates are dropped.
pub fn extract_person_entities(text: &str) -> Vec<Entity> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut entities: Vec<Entity> = Vec::new();
    for m in PERSON_NAME.find_iter(text) {
        if entities.iter().any(|e| e.name == m.as_str()) {
            continue;
        }
        entities.push(Entity {
            name: m.as_str().to_string(),
            label: "PERSON".to_string(),
        });
    }
    entities
}

pub fn split_sentences(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = trimmed.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let (idx, c) = chars[i];

        // Paragraph breaks are hard boundaries.
        if c == '\n' {
            push_sentence(&mut sentences, &trimmed[start..idx]);
            i += 1;
            while i < chars.len() && chars[i].1.is_whitespace() {
                i += 1;
            }
            start = if i < chars.len() { chars[i].0 } else { trimmed.len() };
            continue;
        }

        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        // Swallow trailing terminators and closing quotes.
        let mut end = i;
        while end + 1 < chars.len() && matches!(chars[end + 1].1, '.' | '!' | '?' | '"' | '\'' | ')')
        {
            end += 1;
        }
        let end_byte = chars[end].0 + chars[end].1.len_utf8();

        let mut next = end + 1;
        while next < chars.len() && chars[next].1 == ' ' {
            next += 1;
        }
        let at_eof = next >= chars.len();
        let next_starts_sentence = !at_eof
            && chars[end + 1].1.is_whitespace()
            && (chars[next].1.is_uppercase() || chars[next].1.is_ascii_digit());

        let abbreviation = c == '.' && is_abbreviation(&trimmed[start..idx]);

        if (at_eof || next_starts_sentence) && !abbreviation {
            push_sentence(&mut sentences, &trimmed[start..end_byte]);
            start = if at_eof { trimmed.len() } else { chars[next].0 };
            i = next;
        } else {
            i = end + 1;
        }
    }

    if start < trimmed.len() {
        push_sentence(&mut sentences, &trimmed[start..]);
    }
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sent = raw.trim();
    if !sent.is_empty() {
        sentences.push(sent.to_string());
    }
}

// Short capitalized tokens before a period read as titles ("Mr.", "St.")
// rather than sentence ends.
fn is_abbreviation(before: &str) -> bool {
    let Some(last) = before.split_whitespace().last() else {
        return false;
    };
    last.len() <= 3
        && last.chars().next().is_some_and(|ch| ch.is_uppercase())
        && last.chars().all(|ch| ch.is_alphabetic())
}

// Lead-sentence extraction bounded by a word budget; the offline stand-in for
// the abstractive model.
pub fn extractive_summary(text: &str, max_words: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return String::new();
    }

    let mut out: Vec<&str> = Vec::new();
    let mut words = 0usize;
    for sent in &sentences {
        let sent_words = sent.split_whitespace().count();
        if !out.is_empty() && words + sent_words > max_words {
            break;
        }
        out.push(sent);
        words += sent_words;
        if words >= max_words {
            break;
        }
    }

    let lead = out.join(" ");
    let lead_words: Vec<&str> = lead.split_whitespace().collect();
    if lead_words.len() > max_words && max_words > 0 {
        return lead_words[..max_words].join(" ");
    }
    lead
}
