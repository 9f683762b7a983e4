use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use hubscout_core::models::TimeFrame;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/trending/models", get(trending_models))
        .route("/trending/datasets", get(trending_datasets))
        .route("/trending/spaces", get(trending_spaces))
        .route("/trending/papers", get(trending_papers))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Both query structs are extracted as Option<Query<_>>: a garbage
// parameter falls back to the defaults instead of axum's plain-text 400,
// so the surface never emits a non-JSON body.
#[derive(Debug, Default, Deserialize)]
struct TrendingQuery {
    limit: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct PapersQuery {
    #[serde(rename = "timeFrame")]
    time_frame: Option<TimeFrame>,
}

fn query_or_default<T: Default>(query: Option<Query<T>>) -> T {
    query.map(|Query(inner)| inner).unwrap_or_default()
}

async fn trending_models(
    State(state): State<AppState>,
    query: Option<Query<TrendingQuery>>,
) -> Response {
    let limit = query_or_default(query).limit.unwrap_or(state.default_limit);
    let param = limit.to_string();

    if let Some(body) = state.cache.get("models", &param) {
        return ok_with_cache_directive(&state, body);
    }

    match state.source.trending_models(limit).await {
        Ok(models) => {
            let body = serde_json::json!({ "models": models });
            state.cache.set("models", &param, body.clone());
            ok_with_cache_directive(&state, body)
        }
        Err(e) => fetch_failed("models", &e),
    }
}

async fn trending_datasets(
    State(state): State<AppState>,
    query: Option<Query<TrendingQuery>>,
) -> Response {
    let limit = query_or_default(query).limit.unwrap_or(state.default_limit);
    let param = limit.to_string();

    if let Some(body) = state.cache.get("datasets", &param) {
        return ok_with_cache_directive(&state, body);
    }

    match state.source.trending_datasets(limit).await {
        Ok(datasets) => {
            let body = serde_json::json!({ "datasets": datasets });
            state.cache.set("datasets", &param, body.clone());
            ok_with_cache_directive(&state, body)
        }
        Err(e) => fetch_failed("datasets", &e),
    }
}

async fn trending_spaces(
    State(state): State<AppState>,
    query: Option<Query<TrendingQuery>>,
) -> Response {
    let limit = query_or_default(query).limit.unwrap_or(state.default_limit);
    let param = limit.to_string();

    if let Some(body) = state.cache.get("spaces", &param) {
        return ok_with_cache_directive(&state, body);
    }

    match state.source.trending_spaces(limit).await {
        Ok(spaces) => {
            // Spaces ship as a bare array, no wrapper object.
            let body = serde_json::json!(spaces);
            state.cache.set("spaces", &param, body.clone());
            ok_with_cache_directive(&state, body)
        }
        Err(e) => fetch_failed("spaces", &e),
    }
}

async fn trending_papers(
    State(state): State<AppState>,
    query: Option<Query<PapersQuery>>,
) -> Response {
    let time_frame = query_or_default(query).time_frame.unwrap_or_default();
    let param = time_frame.as_param();

    if let Some(body) = state.cache.get("papers", param) {
        return ok_with_cache_directive(&state, body);
    }

    match state.papers.papers(time_frame).await {
        Ok(papers) => {
            let body = serde_json::json!(papers);
            state.cache.set("papers", param, body.clone());
            ok_with_cache_directive(&state, body)
        }
        Err(e) => fetch_failed("papers", &e),
    }
}

fn ok_with_cache_directive(state: &AppState, body: serde_json::Value) -> Response {
    let mut response = (StatusCode::OK, Json(body)).into_response();

    if let Ok(value) = HeaderValue::from_str(&state.cache_control) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }

    response
}

/// Every failure leaves the handler as the same structured body; callers
/// never see a bare 500 or a half-written response.
fn fetch_failed(kind: &str, err: &hubscout_core::Error) -> Response {
    error!("Error fetching {kind}: {err}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": format!("Failed to fetch {kind}") })),
    )
        .into_response()
}
