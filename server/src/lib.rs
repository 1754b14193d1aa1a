use anyhow::Result;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use probsearch_core::{load_corpus, DocId, Normalizer, SearchEngine, SearchError, SearchHit, DEFAULT_K};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub corpus: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub max_k: usize,
    pub stemming: bool,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub k: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<SearchHit>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub max_k: usize,
}

/// Request-level failures, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400
    BadRequest(String),
    /// 404
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidQuery(_) => ApiError::BadRequest("Missing or invalid 'query'".into()),
        }
    }
}

/// Load the corpus and build the engine. Nothing is served until this returns.
pub fn build_app(config: &ServerConfig) -> Result<Router> {
    let corpus = load_corpus(&config.corpus)?;
    let engine = SearchEngine::build_with(Normalizer::new(config.stemming), corpus)?;
    tracing::info!(num_docs = engine.len(), num_terms = engine.index().num_terms(), "search index ready");
    let state = AppState { engine: Arc::new(engine), max_k: config.max_k.max(1) };
    Ok(router(state, config.static_dir.clone()))
}

pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let mut app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_get).post(search_post))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(state);
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.layer(cors).layer(TraceLayer::new_for_http())
}

fn run_search(state: &AppState, query: String, k: Option<usize>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let k = k.unwrap_or(DEFAULT_K).min(state.max_k);
    let results = state.engine.search(&query, k)?;
    let took_s = start.elapsed().as_secs_f64();
    Ok(Json(SearchResponse { query, took_s, results }))
}

pub async fn search_post(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let query = match body.get("query") {
        Some(Value::String(q)) => q.clone(),
        _ => return Err(SearchError::InvalidQuery("query must be a string".into()).into()),
    };
    let k = match body.get("k") {
        None | Some(Value::Null) => None,
        Some(v) => match v.as_u64() {
            Some(k) => Some(k as usize),
            None => return Err(ApiError::BadRequest("'k' must be a non-negative integer".into())),
        },
    };
    run_search(&state, query, k)
}

pub async fn search_get(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let query = params.q.ok_or_else(|| ApiError::from(SearchError::InvalidQuery("missing q".into())))?;
    run_search(&state, query, params.k)
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<Value>, ApiError> {
    let problem = state
        .engine
        .document(doc_id)
        .ok_or_else(|| ApiError::NotFound(format!("document {doc_id} not found")))?;
    Ok(Json(json!({
        "doc_id": doc_id,
        "title": problem.title,
        "description": problem.description,
        "url": problem.url,
        "platform": problem.platform(),
    })))
}
