use crate::error::CorpusError;
use crate::platform::Platform;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One corpus record. The position in the corpus is its `DocId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

impl Problem {
    pub fn new(title: impl Into<String>, description: Option<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), description, url: url.into() }
    }

    /// Text fed to the normalizer. The title appears twice to weight it above the description.
    pub fn indexed_text(&self) -> String {
        format!("{} {} {}", self.title, self.title, self.description.as_deref().unwrap_or(""))
    }

    pub fn platform(&self) -> Platform { Platform::classify(&self.url) }
}

fn parse_record(position: usize, value: serde_json::Value) -> Result<Problem, CorpusError> {
    let problem: Problem = serde_json::from_value(value)
        .map_err(|e| CorpusError::InvalidRecord { position, reason: e.to_string() })?;
    if problem.title.trim().is_empty() {
        return Err(CorpusError::InvalidRecord { position, reason: "blank title".into() });
    }
    Ok(problem)
}

/// Parse a JSON array of records.
pub fn parse_corpus(json: &str) -> Result<Vec<Problem>, CorpusError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .enumerate()
            .map(|(pos, v)| parse_record(pos, v))
            .collect(),
        _ => Err(CorpusError::NotAnArray),
    }
}

/// Parse one JSON record per non-blank line.
pub fn parse_corpus_jsonl<R: BufRead>(reader: R) -> Result<Vec<Problem>, CorpusError> {
    let mut problems = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let value: serde_json::Value = serde_json::from_str(&line)?;
        problems.push(parse_record(problems.len(), value)?);
    }
    Ok(problems)
}

/// Load the corpus from disk. `.jsonl` files are read line by line, anything else as a JSON array.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Problem>, CorpusError> {
    let path = path.as_ref();
    let problems = if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
        parse_corpus_jsonl(BufReader::new(File::open(path)?))?
    } else {
        parse_corpus(&std::fs::read_to_string(path)?)?
    };
    tracing::info!(path = %path.display(), num_docs = problems.len(), "loaded corpus");
    Ok(problems)
}
