use crate::corpus::Problem;
use crate::tokenizer::Normalizer;
use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

/// Corpus-wide term statistics plus each document's term bag.
///
/// Built once from the full corpus and never mutated; IDF values are fixed for
/// the lifetime of the index.
#[derive(Debug, Default)]
pub struct TfIdfIndex {
    normalizer: Normalizer,
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    bags: Vec<HashMap<TermId, u32>>, // raw term counts per document, DocId order
    num_docs: u32,
}

impl TfIdfIndex {
    pub fn build(corpus: &[Problem]) -> Self {
        Self::build_with(Normalizer::default(), corpus)
    }

    pub fn build_with(normalizer: Normalizer, corpus: &[Problem]) -> Self {
        let mut dictionary: HashMap<String, TermId> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut bags = Vec::with_capacity(corpus.len());

        for problem in corpus {
            let mut bag: HashMap<TermId, u32> = HashMap::new();
            for term in normalizer.normalize(&problem.indexed_text()) {
                let next_id = dictionary.len() as TermId;
                let tid = *dictionary.entry(term).or_insert(next_id);
                if df.len() <= tid as usize { df.resize(tid as usize + 1, 0); }
                let count = bag.entry(tid).or_insert(0);
                if *count == 0 { df[tid as usize] += 1; }
                *count += 1;
            }
            bags.push(bag);
        }

        let num_docs = bags.len() as u32;
        tracing::info!(num_docs, num_terms = dictionary.len(), "built tf-idf index");
        Self { normalizer, dictionary, df, bags, num_docs }
    }

    pub fn normalizer(&self) -> &Normalizer { &self.normalizer }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    pub fn num_terms(&self) -> usize { self.dictionary.len() }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    /// Number of documents containing `term`; 0 when the corpus never saw it.
    pub fn doc_frequency(&self, term: &str) -> u32 {
        self.term_id(term).map_or(0, |tid| self.df[tid as usize])
    }

    /// `ln((N + 1) / (df + 1)) + 1`, or 0 for unknown terms and an empty corpus.
    pub fn idf(&self, term: &str) -> f64 {
        self.term_id(term).map_or(0.0, |tid| self.idf_by_id(tid))
    }

    pub fn idf_by_id(&self, tid: TermId) -> f64 {
        let df_t = self.df.get(tid as usize).copied().unwrap_or(0);
        smoothed_idf(df_t, self.num_docs)
    }

    pub fn term_bag(&self, doc_id: DocId) -> Option<&HashMap<TermId, u32>> {
        self.bags.get(doc_id as usize)
    }

    pub(crate) fn bags(&self) -> &[HashMap<TermId, u32>] { &self.bags }
}

fn smoothed_idf(df: u32, num_docs: u32) -> f64 {
    if df == 0 || num_docs == 0 { return 0.0; }
    ((num_docs as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}
