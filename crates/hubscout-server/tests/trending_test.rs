//! Integration tests for the aggregation endpoints, with the relay mocked
//! at the wire. The full stack runs: relay client -> hub client ->
//! normalization -> response cache -> cache directive.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::util::ServiceExt;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hubscout_api::retry::RetryConfig;
use hubscout_api::{HubClient, PapersClient, RelayClient};
use hubscout_core::config::ServerConfig;
use hubscout_core::HubProvider;
use hubscout_server::{router, AppState};

fn state_against(relay: &MockServer) -> AppState {
    let relay_client =
        RelayClient::with_base_url(relay.uri()).with_retry_config(RetryConfig::none());
    let provider = Arc::new(HubProvider::new(
        HubClient::new(relay_client.clone()),
        PapersClient::new(relay_client),
    ));

    AppState::new(provider.clone(), provider, &ServerConfig::default())
}

async fn get_json(
    app: axum::Router,
    uri: &str,
) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_header = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).expect("endpoint body must always be JSON");

    (status, cache_header, body)
}

fn trending_envelope() -> serde_json::Value {
    serde_json::json!({
        "content": {"recentlyTrending": [
            {"repoData": {
                "id": "orgX/modelY",
                "author": "orgX",
                "downloads": 5,
                "likes": 2,
                "lastModified": "2024-01-01",
                "pipeline_tag": "text-classification",
                "private": false,
                "gated": false,
                "authorData": {"avatarUrl": "u"}
            }},
            {"note": "no repoData here"}
        ]}
    })
}

#[tokio::test]
async fn models_endpoint_normalizes_and_attaches_cache_directive() {
    let relay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("isapi", "1"))
        .and(query_param(
            "url",
            "https://huggingface.co/api/trending?limit=10&type=model",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(trending_envelope()))
        .expect(1)
        .mount(&relay)
        .await;

    let (status, cache_header, body) =
        get_json(router(state_against(&relay)), "/trending/models").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cache_header.as_deref(),
        Some("public, s-maxage=600, stale-while-revalidate=59")
    );

    // The malformed entry is skipped, the good one is flattened.
    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0]["modelId"], "orgX/modelY");
    assert_eq!(models[0]["author"], "orgX");
    assert_eq!(models[0]["authorAvatar"], "u");
    assert_eq!(models[0]["pipelineTag"], "text-classification");
    assert_eq!(models[0]["isPrivate"], false);
    assert_eq!(models[0]["isGated"], false);
}

#[tokio::test]
async fn limit_parameter_is_forwarded_upstream() {
    let relay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param(
            "url",
            "https://huggingface.co/api/trending?limit=25&type=model",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(trending_envelope()))
        .expect(1)
        .mount(&relay)
        .await;

    let (status, _, _) =
        get_json(router(state_against(&relay)), "/trending/models?limit=25").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn datasets_endpoint_returns_flattened_records() {
    let relay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param(
            "url",
            "https://huggingface.co/api/trending?limit=10&type=dataset",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": {"recentlyTrending": [
                {"repoData": {
                    "id": "org/corpus",
                    "author": "org",
                    "downloads": 77,
                    "likes": 8,
                    "gated": "auto",
                    "datasetsServerInfo": {"numRows": 5000,
                                           "modalities": ["text"],
                                           "formats": ["parquet"],
                                           "libraries": ["datasets"]}
                }},
                {"repoData": {"id": "orphan/no-author"}}
            ]}
        })))
        .mount(&relay)
        .await;

    let (status, _, body) =
        get_json(router(state_against(&relay)), "/trending/datasets").await;

    assert_eq!(status, StatusCode::OK);
    let datasets = body["datasets"].as_array().unwrap();
    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets[0]["datasetId"], "org/corpus");
    assert_eq!(datasets[0]["numRows"], 5000);
    assert_eq!(datasets[0]["isGated"], true);
}

#[tokio::test]
async fn spaces_endpoint_returns_bare_array_with_fallbacks() {
    let relay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param(
            "url",
            "https://huggingface.co/api/trending?limit=10&type=space",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": {"recentlyTrending": [
                {"repoData": {
                    "id": "acme/cool-app",
                    "author": "acme",
                    "likes": 30,
                    "emoji": "🚀",
                    "ai_short_description": "robot blurb",
                    "runtime": {"domains": [{"domain": "foo.hf.space"}, {"domain": "bar"}]}
                }}
            ]}
        })))
        .mount(&relay)
        .await;

    let (status, cache_header, body) =
        get_json(router(state_against(&relay)), "/trending/spaces").await;

    assert_eq!(status, StatusCode::OK);
    assert!(cache_header.is_some());

    let spaces = body.as_array().unwrap();
    assert_eq!(spaces.len(), 1);
    assert_eq!(spaces[0]["id"], "acme/cool-app");
    assert_eq!(spaces[0]["title"], "cool-app");
    assert_eq!(spaces[0]["description"], "robot blurb");
    assert_eq!(spaces[0]["primaryDomain"], "foo.hf.space");
}

#[tokio::test]
async fn papers_endpoint_windows_by_time_frame() {
    let relay = MockServer::start().await;

    let recent = chrono::Utc::now() - chrono::Duration::days(2);
    let old = chrono::Utc::now() - chrono::Duration::days(20);

    Mock::given(method("GET"))
        .and(query_param(
            "url",
            "https://huggingface.co/api/daily_papers?limit=100",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"paper": {"id": "2401.00001", "title": "Fresh Result", "upvotes": 10},
             "publishedAt": recent.to_rfc3339(),
             "numComments": 3,
             "submittedBy": {"fullname": "Ada"}},
            {"paper": {"id": "2312.99999", "title": "Old Result", "upvotes": 99},
             "publishedAt": old.to_rfc3339()}
        ])))
        .mount(&relay)
        .await;

    let state = state_against(&relay);

    let (status, _, week) =
        get_json(router(state.clone()), "/trending/papers?timeFrame=week").await;
    assert_eq!(status, StatusCode::OK);
    let week_papers = week.as_array().unwrap();
    assert_eq!(week_papers.len(), 1);
    assert_eq!(week_papers[0]["title"], "Fresh Result");
    assert_eq!(week_papers[0]["submittedBy"], "Ada");
    assert_eq!(week_papers[0]["link"], "https://huggingface.co/papers/2401.00001");

    let (_, _, month) =
        get_json(router(state), "/trending/papers?timeFrame=month").await;
    assert_eq!(month.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn relay_failure_maps_to_structured_500() {
    let relay = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&relay)
        .await;

    let (status, _, body) =
        get_json(router(state_against(&relay)), "/trending/models").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"error": "Failed to fetch models"}));
}

#[tokio::test]
async fn non_json_upstream_body_maps_to_structured_500() {
    let relay = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway page</html>"))
        .mount(&relay)
        .await;

    let (status, _, body) =
        get_json(router(state_against(&relay)), "/trending/spaces").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({"error": "Failed to fetch spaces"}));
}

#[tokio::test]
async fn repeat_requests_inside_the_ttl_hit_upstream_once() {
    let relay = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param(
            "url",
            "https://huggingface.co/api/trending?limit=10&type=model",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(trending_envelope()))
        .expect(1)
        .mount(&relay)
        .await;

    let state = state_against(&relay);

    let (_, _, first) = get_json(router(state.clone()), "/trending/models").await;
    let (status, cache_header, second) = get_json(router(state), "/trending/models").await;

    assert_eq!(status, StatusCode::OK);
    // Cached responses carry the directive too, and the payload is
    // byte-identical to the first answer.
    assert!(cache_header.is_some());
    assert_eq!(first, second);
}
