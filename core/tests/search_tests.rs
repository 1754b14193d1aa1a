use probsearch_core::{Platform, Problem, SearchEngine, SearchError, TfIdfIndex, VectorStore};

fn lc(title: &str, description: Option<&str>) -> Problem {
    Problem::new(title, description.map(str::to_string), format!("https://leetcode.com/problems/{}", title.to_lowercase().replace(' ', "-")))
}

fn cf(title: &str, description: Option<&str>) -> Problem {
    Problem::new(title, description.map(str::to_string), "https://codeforces.com/problemset/problem/1/A")
}

fn sample_corpus() -> Vec<Problem> {
    vec![
        lc("Two Sum", Some("Find two numbers in an array that add up to a target.")),
        lc("Binary Tree Level Order Traversal", Some("Return the level order traversal of a binary tree.")),
        cf("Watermelon", Some("Divide a watermelon into two even parts.")),
        lc("Search in Rotated Sorted Array", Some("Binary search over a rotated array.")),
        cf("Shortest Path Queries", Some("Answer shortest path queries on a weighted graph.")),
        lc("Merge Intervals", None),
    ]
}

#[test]
fn one_vector_per_document_in_order() {
    let corpus = sample_corpus();
    let index = TfIdfIndex::build(&corpus);
    let store = VectorStore::build(&index);
    assert_eq!(store.len(), corpus.len());
    assert_eq!(index.num_docs() as usize, corpus.len());
    for (doc_id, vector) in store.iter() {
        let bag = index.term_bag(doc_id).unwrap();
        assert_eq!(vector.len(), bag.len());
        assert!(vector.magnitude >= 0.0);
    }
}

#[test]
fn idf_does_not_increase_with_document_frequency() {
    let rare = vec![cf("graph alpha", None), cf("beta", None), cf("gamma", None)];
    let common = vec![cf("graph alpha", None), cf("graph beta", None), cf("gamma", None)];
    let rare_idf = TfIdfIndex::build(&rare).idf("graph");
    let common_idf = TfIdfIndex::build(&common).idf("graph");
    assert!(rare_idf >= common_idf);
    assert!(common_idf > 0.0);
}

#[test]
fn absent_term_has_zero_idf() {
    let index = TfIdfIndex::build(&sample_corpus());
    assert_eq!(index.idf("zygote"), 0.0);
    assert_eq!(index.doc_frequency("zygote"), 0);
}

#[test]
fn each_title_retrieves_its_own_document() {
    let corpus = sample_corpus();
    let engine = SearchEngine::build(corpus.clone()).unwrap();
    for (doc_id, problem) in corpus.iter().enumerate() {
        let hits = engine.search(&problem.title, 3).unwrap();
        let own = hits.iter().find(|h| h.doc_id as usize == doc_id);
        assert!(own.is_some(), "{} not in top 3", problem.title);
        assert!(own.unwrap().score > 0.0);
    }
}

#[test]
fn stopword_only_query_is_empty_not_an_error() {
    let engine = SearchEngine::build(sample_corpus()).unwrap();
    assert!(engine.search("the a of", 10).unwrap().is_empty());
}

#[test]
fn empty_query_is_invalid() {
    let engine = SearchEngine::build(sample_corpus()).unwrap();
    assert!(matches!(engine.search("", 10), Err(SearchError::InvalidQuery(_))));
    assert!(matches!(engine.search("   ", 10), Err(SearchError::InvalidQuery(_))));
}

#[test]
fn binary_search_prefers_the_leetcode_tree() {
    let engine = SearchEngine::build(vec![
        Problem::new("Binary Search Tree Insert", None, "https://leetcode.com/x"),
        Problem::new("Graph BFS Traversal", None, "https://codeforces.com/y"),
    ])
    .unwrap();
    let hits = engine.search("binary search", 10).unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0].doc_id, 0);
    assert_eq!(hits[0].platform, Platform::LeetCode);
    let doc1 = hits.iter().find(|h| h.doc_id == 1).map_or(0.0, |h| h.score);
    assert!(hits[0].score > doc1);
}

#[test]
fn k_limits_to_the_best_hit() {
    let corpus = vec![
        cf("array sum", None),
        cf("array array sum", None),
        cf("array max", Some("largest value in an array")),
        cf("array rotate", None),
        cf("array reverse", None),
    ];
    let engine = SearchEngine::build(corpus).unwrap();
    let all = engine.search("array", 10).unwrap();
    assert_eq!(all.len(), 5);
    let top = engine.search("array", 1).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0], all[0]);
}

#[test]
fn fewer_than_k_when_few_match() {
    let engine = SearchEngine::build(sample_corpus()).unwrap();
    let hits = engine.search("watermelon", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].platform, Platform::Codeforces);
}

#[test]
fn repeated_searches_are_identical() {
    let mut corpus = sample_corpus();
    // exact duplicates tie on score and must come back in corpus order
    corpus.push(lc("Merge Intervals", None));
    let engine = SearchEngine::build(corpus).unwrap();
    let first = engine.search("merge intervals binary array", 10).unwrap();
    let second = engine.search("merge intervals binary array", 10).unwrap();
    assert_eq!(first, second);

    let merges: Vec<u32> = first.iter().filter(|h| h.title == "Merge Intervals").map(|h| h.doc_id).collect();
    assert_eq!(merges, vec![5, 6]);
    for pair in first.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn description_is_carried_through_and_unknown_hosts_are_flagged() {
    let engine = SearchEngine::build(vec![Problem::new(
        "Frog Jump",
        Some("A frog jumps across stones.".into()),
        "https://atcoder.jp/contests/dp/tasks/dp_a",
    )])
    .unwrap();
    let hits = engine.search("frog", 10).unwrap();
    assert_eq!(hits[0].description.as_deref(), Some("A frog jumps across stones."));
    assert_eq!(hits[0].platform, Platform::Unknown);
}

#[test]
fn empty_corpus_searches_cleanly() {
    let engine = SearchEngine::build(Vec::new()).unwrap();
    assert!(engine.is_empty());
    assert!(engine.search("anything", 10).unwrap().is_empty());
}

#[test]
fn corpus_file_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all_problems.json");
    std::fs::write(&path, r#"[{"title":"Two Sum","url":"https://leetcode.com/problems/two-sum"}]"#).unwrap();
    let corpus = probsearch_core::load_corpus(&path).unwrap();
    assert_eq!(corpus.len(), 1);

    let bad = dir.path().join("bad.jsonl");
    std::fs::write(&bad, "{\"url\":\"https://leetcode.com\"}\n").unwrap();
    assert!(probsearch_core::load_corpus(&bad).is_err());
    assert!(probsearch_core::load_corpus(dir.path().join("missing.json")).is_err());
}

const EPS: f64 = 1e-9;

fn idf(df: f64, n: f64) -> f64 {
    ((n + 1.0) / (df + 1.0)).ln() + 1.0
}

#[test]
fn query_proportional_to_a_document_scores_one() {
    let engine = SearchEngine::build(vec![cf("graph", None), cf("tree", None)]).unwrap();
    // "zebra" is unknown but still counts towards the query length
    let hits = engine.search("graph graph zebra", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, 0);
    assert!((hits[0].score - 1.0).abs() < EPS, "score {}", hits[0].score);
}

#[test]
fn two_term_cosine_matches_hand_computation() {
    // doc0 bag {graph: 2, tree: 2}, doc1 {graph: 2}, doc2 {heap: 2}; N = 3
    let engine = SearchEngine::build(vec![cf("graph tree", None), cf("graph", None), cf("heap", None)]).unwrap();
    let g = idf(2.0, 3.0);
    let t = idf(1.0, 3.0);
    assert!((engine.index().idf("graph") - g).abs() < EPS);
    assert!((engine.index().idf("tree") - t).abs() < EPS);

    // query tf: graph 1/3, tree 2/3
    let hits = engine.search("graph tree tree", 10).unwrap();
    assert_eq!(hits.len(), 2);
    let doc0 = (g * g + 2.0 * t * t) / ((g * g + 4.0 * t * t).sqrt() * (g * g + t * t).sqrt());
    let doc1 = g / (g * g + 4.0 * t * t).sqrt();
    assert_eq!(hits[0].doc_id, 0);
    assert!((hits[0].score - doc0).abs() < EPS, "doc0 {} vs {}", hits[0].score, doc0);
    assert_eq!(hits[1].doc_id, 1);
    assert!((hits[1].score - doc1).abs() < EPS, "doc1 {} vs {}", hits[1].score, doc1);
}

#[test]
fn single_shared_term_scores_its_share_of_the_document() {
    let engine = SearchEngine::build(vec![cf("graph tree", None), cf("heap", None)]).unwrap();
    let g = idf(1.0, 2.0);
    let t = idf(1.0, 2.0);
    let hits = engine.search("tree", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert!((hits[0].score - t / (g * g + t * t).sqrt()).abs() < EPS);
}
