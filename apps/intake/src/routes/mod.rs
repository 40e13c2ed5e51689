pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::intake::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_session))
        .route("/api/v1/sessions/:id/turns", post(handlers::handle_turn))
        .route(
            "/api/v1/sessions/:id/transcript",
            get(handlers::handle_get_transcript),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::intake::store::SessionStore;
    use crate::questions::generator::FallbackOnlyGenerator;

    fn test_state(transcript_dir: &Path) -> AppState {
        AppState {
            sessions: SessionStore::default(),
            generator: Arc::new(FallbackOnlyGenerator),
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                anthropic_api_key: None,
                generation_timeout: Duration::from_secs(1),
                transcript_dir: transcript_dir.to_path_buf(),
                question_seed: None,
                question_count: Some(3),
            },
        }
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn create_session(router: &Router) -> String {
        let (status, body) = send(
            router,
            Request::post("/api/v1/sessions").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let router = build_router(test_state(tmp.path()));
        let (status, body) = send(&router, Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_full_session_over_http() {
        let tmp = tempfile::tempdir().unwrap();
        let router = build_router(test_state(tmp.path()));
        let id = create_session(&router).await;
        let turns_uri = format!("/api/v1/sessions/{id}/turns");

        let utterances = [
            "My name is Jane Doe",
            "jane@example.com",
            "5551234567",
            "6 years",
            "Senior Software Engineer",
            "I am from Pune, India",
            "python, java, sql",
        ];
        let mut last = Value::Null;
        for text in utterances {
            let (status, body) = send(&router, post_json(&turns_uri, json!({ "text": text }))).await;
            assert_eq!(status, StatusCode::OK);
            last = body;
        }
        assert_eq!(last["phase"], "ended");
        assert_eq!(last["messages"].as_array().unwrap().len(), 5);

        let (status, transcript) = send(
            &router,
            Request::get(format!("/api/v1/sessions/{id}/transcript"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(transcript["candidate"]["full_name"], "Jane Doe");
        let keys: Vec<&String> = transcript["candidate"]["questions"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys.len(), 3);

        let written: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(written.len(), 1);

        let (status, body) = send(&router, post_json(&turns_uri, json!({ "text": "hello" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SESSION_ENDED");
    }

    #[tokio::test]
    async fn test_transcript_not_ready_before_end() {
        let tmp = tempfile::tempdir().unwrap();
        let router = build_router(test_state(tmp.path()));
        let id = create_session(&router).await;

        let (status, body) = send(
            &router,
            Request::get(format!("/api/v1/sessions/{id}/transcript"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "NOT_READY");
    }

    #[tokio::test]
    async fn test_snapshot_after_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let router = build_router(test_state(tmp.path()));
        let id = create_session(&router).await;

        let (_, outcome) = send(
            &router,
            post_json(&format!("/api/v1/sessions/{id}/turns"), json!({ "text": "EXIT" })),
        )
        .await;
        assert_eq!(outcome["phase"], "ended");

        let (status, snapshot) = send(
            &router,
            Request::get(format!("/api/v1/sessions/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(snapshot["pending"].as_array().unwrap().len(), 7);
        assert_eq!(snapshot["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_sessions_ending_together_keep_separate_transcripts() {
        let tmp = tempfile::tempdir().unwrap();
        let router = build_router(test_state(tmp.path()));

        for name in ["Alice", "Bob"] {
            let id = create_session(&router).await;
            let turns_uri = format!("/api/v1/sessions/{id}/turns");
            for text in [format!("My name is {name}"), "exit".to_string()] {
                let (status, _) = send(&router, post_json(&turns_uri, json!({ "text": text }))).await;
                assert_eq!(status, StatusCode::OK);
            }
        }

        let mut names: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| {
                let written = std::fs::read_to_string(entry.unwrap().path()).unwrap();
                let value: Value = serde_json::from_str(&written).unwrap();
                value["candidate"]["full_name"].as_str().unwrap().to_string()
            })
            .collect();
        names.sort();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let router = build_router(test_state(tmp.path()));
        let (status, body) = send(
            &router,
            post_json(
                &format!("/api/v1/sessions/{}/turns", uuid::Uuid::new_v4()),
                json!({ "text": "hi" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
