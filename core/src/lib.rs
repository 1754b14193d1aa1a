pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod platform;
pub mod tokenizer;
pub mod vectors;

pub use corpus::{load_corpus, parse_corpus, parse_corpus_jsonl, Problem};
pub use engine::{SearchEngine, SearchHit, DEFAULT_K};
pub use error::{CorpusError, SearchError};
pub use index::{DocId, TermId, TfIdfIndex};
pub use platform::Platform;
pub use tokenizer::{normalize, Normalizer};
pub use vectors::{DocumentVector, VectorStore};
