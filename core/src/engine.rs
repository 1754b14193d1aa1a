use crate::corpus::Problem;
use crate::error::{CorpusError, SearchError};
use crate::index::{DocId, TermId, TfIdfIndex};
use crate::platform::Platform;
use crate::tokenizer::Normalizer;
use crate::vectors::VectorStore;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Instant;

pub const DEFAULT_K: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub platform: Platform,
    pub score: f64,
}

/// Immutable corpus, index and vectors. Build once, share behind an `Arc`,
/// and query from any number of threads.
#[derive(Debug)]
pub struct SearchEngine {
    corpus: Vec<Problem>,
    index: TfIdfIndex,
    vectors: VectorStore,
}

impl SearchEngine {
    pub fn build(corpus: Vec<Problem>) -> Result<Self, CorpusError> {
        Self::build_with(Normalizer::default(), corpus)
    }

    pub fn build_with(normalizer: Normalizer, corpus: Vec<Problem>) -> Result<Self, CorpusError> {
        for (position, problem) in corpus.iter().enumerate() {
            if problem.title.trim().is_empty() {
                return Err(CorpusError::InvalidRecord { position, reason: "blank title".into() });
            }
        }
        let index = TfIdfIndex::build_with(normalizer, &corpus);
        let vectors = VectorStore::build(&index);
        Ok(Self { corpus, index, vectors })
    }

    pub fn index(&self) -> &TfIdfIndex { &self.index }

    pub fn vectors(&self) -> &VectorStore { &self.vectors }

    pub fn document(&self, doc_id: DocId) -> Option<&Problem> { self.corpus.get(doc_id as usize) }

    pub fn len(&self) -> usize { self.corpus.len() }

    pub fn is_empty(&self) -> bool { self.corpus.is_empty() }

    pub fn search_default(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.search(query, DEFAULT_K)
    }

    /// Top `k` documents by cosine similarity to `query`, best first.
    ///
    /// Only documents with a positive score are returned; ties keep corpus order.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query must not be empty".into()));
        }
        let start = Instant::now();
        let ranked = self.rank(query);
        let hits: Vec<SearchHit> = ranked
            .into_iter()
            .take(k)
            .filter_map(|(doc_id, score)| self.hit(doc_id, score))
            .collect();
        tracing::debug!(query, k, hits = hits.len(), took_us = start.elapsed().as_micros() as u64, "search");
        Ok(hits)
    }

    fn rank(&self, query: &str) -> Vec<(DocId, f64)> {
        let tokens = self.index.normalizer().normalize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut tf_q_raw: HashMap<&str, u32> = HashMap::new();
        for token in &tokens {
            *tf_q_raw.entry(token.as_str()).or_insert(0) += 1;
        }

        // Unknown terms still count towards N_q but carry no weight.
        let n_q = tokens.len() as f64;
        let mut q_weights: HashMap<TermId, f64> = HashMap::new();
        for (term, count) in tf_q_raw {
            if let Some(tid) = self.index.term_id(term) {
                let w = (count as f64 / n_q) * self.index.idf_by_id(tid);
                q_weights.insert(tid, w);
            }
        }
        let mut q_norm = q_weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if q_norm == 0.0 { q_norm = 1.0; }

        let mut scored: Vec<(DocId, f64)> = self
            .vectors
            .iter()
            .filter_map(|(doc_id, vector)| {
                let dot: f64 = q_weights.iter().map(|(tid, wq)| wq * vector.weight(*tid)).sum();
                let d_norm = if vector.magnitude == 0.0 { 1.0 } else { vector.magnitude };
                let score = dot / (q_norm * d_norm);
                (score > 0.0).then_some((doc_id, score))
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
        scored
    }

    fn hit(&self, doc_id: DocId, score: f64) -> Option<SearchHit> {
        let problem = self.document(doc_id)?;
        Some(SearchHit {
            doc_id,
            title: problem.title.clone(),
            description: problem.description.clone(),
            url: problem.url.clone(),
            platform: problem.platform(),
            score,
        })
    }
}
