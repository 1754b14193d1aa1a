use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Alphanumeric runs; an apostrophe only counts when it sits between two word characters.
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Turns raw text into index terms.
///
/// The same instance must be used for documents and queries; the index keeps
/// the one it was built with and the scorer always goes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    pub stemming: bool,
}

impl Default for Normalizer {
    fn default() -> Self { Self { stemming: true } }
}

impl Normalizer {
    pub fn new(stemming: bool) -> Self { Self { stemming } }

    /// Decompose (NFKD) and drop combining marks, lowercase, split into
    /// alphanumeric runs, remove stopwords, then optionally stem.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let folded: String = text
            .nfkd()
            .filter(|c| !is_combining_mark(*c))
            .map(|c| if c == '\u{2019}' { '\'' } else { c })
            .collect::<String>()
            .to_lowercase();
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&folded) {
            let token = mat.as_str();
            if is_stopword(token) { continue; }
            let bare: String = token.chars().filter(|c| *c != '\'').collect();
            if self.stemming {
                tokens.push(STEMMER.stem(&bare).into_owned());
            } else {
                tokens.push(bare);
            }
        }
        tokens
    }
}

/// Normalize with the default (stemming) normalizer.
pub fn normalize(text: &str) -> Vec<String> {
    Normalizer::default().normalize(text)
}
