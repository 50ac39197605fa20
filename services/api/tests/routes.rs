//! End-to-end checks of the HTTP surface against the in-memory repository.

use api_lib::{
    adapters::InMemoryProfileRepository,
    config::Config,
    web::{app_router, rest::ApiDoc, state::AppState},
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use utoipa::OpenApi;

fn app() -> Router {
    let state = AppState::new(
        Arc::new(Config::default()),
        Arc::new(InMemoryProfileRepository::new()),
    );
    app_router(Arc::new(state))
}

fn onboard_body() -> Value {
    json!({
        "user_name": "Dana",
        "samples": [
            { "text": "I build things. I ship fast. That's it, really. I keep building every single day." },
            { "text": "Don't wait. Ship it now! Waiting is how good ideas quietly die on the vine." },
            { "text": "Here's the truth: speed wins. That's it. Nothing else matters half as much." }
        ]
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (status, body) = send(&app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "VoiceStyle API");
}

#[tokio::test]
async fn onboard_then_fetch_list_and_delete() {
    let app = app();

    let (status, profile) = send(&app, "POST", "/api/onboard", Some(onboard_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = profile["id"].as_str().unwrap().to_string();
    assert_eq!(profile["user_name"], "Dana");
    assert!(profile["metrics"]["contraction_ratio"].as_f64().unwrap() > 0.0);

    let (status, fetched) = send(&app, "GET", &format!("/api/profiles/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, profile);

    let (status, listed) = send(&app, "GET", "/api/profiles", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["sample_count"], 3);

    let (status, deleted) = send(&app, "DELETE", &format!("/api/profiles/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["status"], "deleted");

    let (status, _) = send(&app, "GET", &format!("/api/profiles/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_samples_are_a_bad_request() {
    let mut body = onboard_body();
    body["samples"].as_array_mut().unwrap().truncate(2);

    let (status, error) = send(&app(), "POST", "/api/onboard", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["detail"].as_str().unwrap().contains("at least 3"));
}

#[tokio::test]
async fn directive_compiles_and_validates_drafts() {
    let app = app();
    let (_, profile) = send(&app, "POST", "/api/onboard", Some(onboard_body())).await;
    let id = profile["id"].clone();

    let (status, directive) = send(
        &app,
        "POST",
        "/api/directive",
        Some(json!({ "profile_id": id, "draft_text": "We regret to inform you of a delay." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(directive["profile_id"], id);
    assert!(directive["targets"]["avg_sentence_length"]["min"].is_number());

    let (status, _) = send(
        &app,
        "POST",
        "/api/directive",
        Some(json!({ "profile_id": id, "draft_text": "too short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn extending_a_profile_creates_a_new_one() {
    let app = app();
    let (_, original) = send(&app, "POST", "/api/onboard", Some(onboard_body())).await;
    let id = original["id"].as_str().unwrap();

    let (status, extended) = send(
        &app,
        "POST",
        &format!("/api/profiles/{id}/samples"),
        Some(json!({ "samples": [
            { "text": "Momentum beats polish. Ship it now, then fix what breaks along the way." }
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(extended["id"], original["id"]);
    assert_eq!(extended["sample_count"], 4);

    let (_, listed) = send(&app, "GET", "/api/profiles", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn rewrite_without_a_generator_is_unavailable() {
    let app = app();
    let (_, profile) = send(&app, "POST", "/api/onboard", Some(onboard_body())).await;

    let (status, error) = send(
        &app,
        "POST",
        "/api/rewrite",
        Some(json!({ "profile_id": profile["id"], "draft_text": "We regret to inform you of a delay." })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(error["detail"].as_str().unwrap().contains("generator"));
}

#[tokio::test]
async fn unknown_profiles_are_not_found() {
    let (status, _) = send(
        &app(),
        "GET",
        "/api/profiles/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wordless_samples_are_unprocessable() {
    let body = json!({
        "user_name": "Dana",
        "samples": [
            { "text": "!".repeat(60) },
            { "text": "?".repeat(60) },
            { "text": "-".repeat(60) }
        ]
    });

    let (status, error) = send(&app(), "POST", "/api/onboard", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(error["detail"].as_str().unwrap().contains("Insufficient data"));
}

#[test]
fn openapi_document_describes_response_bodies() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let schemas = &doc["components"]["schemas"];
    for name in [
        "StyleProfile",
        "StyleMetrics",
        "ProfileListItem",
        "RewriteDirective",
        "MetricTargets",
        "RewriteOutcome",
    ] {
        assert!(schemas.get(name).is_some(), "missing schema {name}");
    }

    let body = |path: &str, method: &str, status: &str| {
        doc["paths"][path][method]["responses"][status]["content"]["application/json"]["schema"]
            .clone()
    };
    assert_eq!(
        body("/api/onboard", "post", "201")["$ref"],
        "#/components/schemas/StyleProfile"
    );
    assert_eq!(
        body("/api/directive", "post", "200")["$ref"],
        "#/components/schemas/RewriteDirective"
    );
    assert_eq!(
        body("/api/profiles", "get", "200")["items"]["$ref"],
        "#/components/schemas/ProfileListItem"
    );
    assert_eq!(
        schemas["StyleProfile"]["properties"]["metrics"]["$ref"],
        "#/components/schemas/StyleMetrics"
    );
}
