use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use sa_analytics::{
    daily_engagement, keyword_frequency, ranked_keywords, recent_posts, sentiment_histogram, to_csv_bytes,
    Dashboard, DailyEngagement, HistogramBin, KeywordCount,
};
use sa_core::{config::{clamp_bins, clamp_limit}, ManualEntry, Post, PostStorage, TextField};
use sa_sources::IngestMode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{ApiError, AppState};

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct PostsQuery {
    /// Only the `n` newest posts
    pub recent: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeywordsQuery {
    pub top: Option<usize>,
    pub field: Option<TextField>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistogramQuery {
    pub bins: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FetchRequest {
    pub source: Option<String>,
    pub topic: Option<String>,
    pub limit: Option<usize>,
    pub mode: Option<IngestMode>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub stored: usize,
    pub total: usize,
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PostsQuery>,
) -> Json<Vec<Post>> {
    let snapshot = state.storage().snapshot().await;
    match query.recent {
        Some(n) => Json(recent_posts(&snapshot, n)),
        None => Json(snapshot.to_vec()),
    }
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<ManualEntry>,
) -> ApiResult<impl IntoResponse> {
    let stored = state.sources.add_manual(entry).await?;
    let total = state.storage().len().await;
    Ok((StatusCode::CREATED, Json(IngestResponse { stored, total })))
}

pub async fn clear_posts(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.storage().clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn fetch_posts(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FetchRequest>,
) -> ApiResult<Json<IngestResponse>> {
    let config = &state.config;
    let source = request.source.unwrap_or_else(|| config.source.clone());
    let topic = request.topic.unwrap_or_else(|| config.topic.clone());
    let limit = clamp_limit(request.limit.unwrap_or(config.limit));
    let mode = request.mode.unwrap_or_default();

    let stored = state.sources.ingest(&source, &topic, limit, mode).await?;
    let total = state.storage().len().await;
    Ok(Json(IngestResponse { stored, total }))
}

pub async fn store_state(State(state): State<Arc<AppState>>) -> Json<Value> {
    let storage = state.storage();
    Json(json!({
        "state": storage.state().await,
        "posts": storage.len().await,
    }))
}

pub async fn engagement(State(state): State<Arc<AppState>>) -> Json<Vec<DailyEngagement>> {
    let snapshot = state.storage().snapshot().await;
    Json(daily_engagement(&snapshot))
}

pub async fn keywords(
    State(state): State<Arc<AppState>>,
    Query(query): Query<KeywordsQuery>,
) -> Json<Vec<KeywordCount>> {
    let snapshot = state.storage().snapshot().await;
    let field = query.field.unwrap_or(state.config.keyword_field);
    let frequency = keyword_frequency(&snapshot, field);
    Json(ranked_keywords(&frequency, query.top.unwrap_or(state.config.top_keywords)))
}

pub async fn sentiment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistogramQuery>,
) -> Json<Vec<HistogramBin>> {
    let snapshot = state.storage().snapshot().await;
    let bins = clamp_bins(query.bins.unwrap_or(state.config.histogram_bins));
    Json(sentiment_histogram(&snapshot, bins))
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    let snapshot = state.storage().snapshot().await;
    Json(Dashboard::build(&snapshot, &state.config))
}

pub async fn export_csv(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let snapshot = state.storage().snapshot().await;
    let body = to_csv_bytes(&snapshot)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"posts.csv\""),
        ],
        body,
    ))
}
