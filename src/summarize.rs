use std::env;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::nlp::{Nlp, SummarizeError};
use crate::record::MatchRecord;
use crate::template::build_template_summary;

const DEFAULT_TIMEOUT_SECS: u64 = 20;
const SHORT_TEXT_CHARS: usize = 50;
const PARAGRAPH_MAX_WORDS: usize = 60;
const COMBINE_MAX_WORDS: usize = 200;
const HYBRID_MAX_WORDS: usize = 60;
const HYBRID_MIN_WORDS: usize = 25;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client, SummarizeError> {
    CLIENT.get_or_try_init(|| {
        let timeout = env::var("SUMMARY_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|err| SummarizeError::Network(err.to_string()))
    })
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    inputs: &'a str,
    parameters: SummaryParameters,
}

#[derive(Debug, Serialize)]
struct SummaryParameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummaryChunk {
    summary_text: String,
}

// A hosted BART-style summarization endpoint. Absent configuration means the
// caller runs fully offline.
#[derive(Debug, Clone)]
pub struct SummaryEndpoint {
    url: String,
    token: Option<String>,
}

impl SummaryEndpoint {
    pub fn new(url: String, token: Option<String>) -> Self {
        Self { url, token }
    }

    pub fn from_env() -> Option<Self> {
        let url = env::var("SUMMARY_API_URL").ok()?;
        if url.trim().is_empty() {
            return None;
        }
        let token = env::var("SUMMARY_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Some(Self::new(url, token))
    }

    pub fn summarize(
        &self,
        text: &str,
        max_words: usize,
        min_words: usize,
    ) -> Result<String, SummarizeError> {
        let client = http_client()?;
        let request = SummaryRequest {
            inputs: text,
            parameters: SummaryParameters {
                max_length: max_words,
                min_length: min_words,
                do_sample: false,
            },
        };

        let mut req = client.post(&self.url).json(&request);
        if let Some(token) = self.token.as_ref() {
            req = req.bearer_auth(token);
        }

        let resp = req.send().map_err(|err| {
            if err.is_timeout() {
                SummarizeError::Timeout
            } else {
                SummarizeError::Network(err.to_string())
            }
        })?;

        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SummarizeError::RateLimited);
        }
        if !status.is_success() {
            return Err(SummarizeError::Http(status.as_u16()));
        }

        let chunks: Vec<SummaryChunk> = resp
            .json()
            .map_err(|err| SummarizeError::Parse(err.to_string()))?;
        let first = chunks
            .into_iter()
            .next()
            .ok_or_else(|| SummarizeError::Parse("empty response array".to_string()))?;
        Ok(first.summary_text)
    }
}

// Paragraph-wise pass, then a combine pass. Every summarize failure falls
// back to the text that went in; this function never surfaces an error.
pub fn summarize_report(nlp: &dyn Nlp, text: &str) -> String {
    if text.trim().chars().count() < SHORT_TEXT_CHARS {
        return text.to_string();
    }

    let mut paragraph_summaries: Vec<String> = Vec::new();
    for paragraph in text.split('\n').filter(|p| !p.trim().is_empty()) {
        let words = paragraph.split_whitespace().count();
        let max_len = words.min(PARAGRAPH_MAX_WORDS);
        let min_len = (max_len / 2).max(5).min(max_len);
        let summary = match nlp.summarize(paragraph, max_len, min_len) {
            Ok(summary) => summary,
            Err(_) => paragraph.to_string(),
        };
        paragraph_summaries.push(summary);
    }

    let combined = paragraph_summaries.join(" ");
    let final_max = combined.split_whitespace().count().min(COMBINE_MAX_WORDS);
    let final_min = (final_max / 2).max(10).min(final_max);
    match nlp.summarize(&combined, final_max, final_min) {
        Ok(summary) => summary,
        Err(_) => combined,
    }
}

// Template facts refined by the abstractive model; the template itself is the
// mandatory fallback.
pub fn hybrid_summary(nlp: &dyn Nlp, record: &MatchRecord) -> String {
    let template = build_template_summary(record);
    match nlp.summarize(&template, HYBRID_MAX_WORDS, HYBRID_MIN_WORDS) {
        Ok(refined) => refined,
        Err(_) => template,
    }
}
