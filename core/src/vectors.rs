use crate::index::{DocId, TermId, TfIdfIndex};
use std::collections::HashMap;

/// Sparse TF-IDF weights of one document; absent terms weigh 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentVector {
    pub weights: HashMap<TermId, f64>,
    pub magnitude: f64,
}

impl DocumentVector {
    pub fn weight(&self, tid: TermId) -> f64 { self.weights.get(&tid).copied().unwrap_or(0.0) }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }
}

/// One precomputed vector per document, in `DocId` order.
#[derive(Debug, Default)]
pub struct VectorStore {
    vectors: Vec<DocumentVector>,
}

impl VectorStore {
    pub fn build(index: &TfIdfIndex) -> Self {
        let vectors = index
            .bags()
            .iter()
            .map(|bag| {
                let weights: HashMap<TermId, f64> = bag
                    .iter()
                    .map(|(tid, count)| (*tid, *count as f64 * index.idf_by_id(*tid)))
                    .collect();
                let magnitude = weights.values().map(|w| w * w).sum::<f64>().sqrt();
                DocumentVector { weights, magnitude }
            })
            .collect();
        Self { vectors }
    }

    pub fn get(&self, doc_id: DocId) -> Option<&DocumentVector> { self.vectors.get(doc_id as usize) }

    pub fn len(&self) -> usize { self.vectors.len() }

    pub fn is_empty(&self) -> bool { self.vectors.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, &DocumentVector)> {
        self.vectors.iter().enumerate().map(|(i, v)| (i as DocId, v))
    }
}
