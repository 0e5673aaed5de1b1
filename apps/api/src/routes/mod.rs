pub mod health;

use axum::{
    http::{Method, Uri},
    routing::{get, post},
    Router,
};
use tracing::warn;

use crate::analysis::handlers::handle_analyze_job;
use crate::errors::AppError;
use crate::profile::handlers::{handle_get_profile, handle_save_profile};
use crate::state::AppState;

async fn method_not_allowed(method: Method, uri: Uri) -> Result<(), AppError> {
    warn!("Rejected {method} {uri}");
    Err(AppError::MethodNotAllowed)
}

async fn not_found(uri: Uri) -> Result<(), AppError> {
    Err(AppError::NotFound(format!("No route for {}", uri.path())))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/analyze-job",
            post(handle_analyze_job).fallback(method_not_allowed),
        )
        .route(
            "/api/profile",
            get(handle_get_profile)
                .post(handle_save_profile)
                .put(handle_save_profile)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::parser::PARSE_FAILURE_NOTICE;
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::profile::store::memory::MemoryRecordStore;

    const BODY_LIMIT: usize = 1_048_576;

    /// Replies with fixed text (or an API error) and counts calls.
    struct FakeGenerator {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl FakeGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().ok_or(LlmError::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            })
        }
    }

    fn router_with(generator: Option<Arc<FakeGenerator>>) -> Router {
        build_router(AppState {
            generator: generator.map(|g| g as Arc<dyn TextGenerator>),
            store: Arc::new(MemoryRecordStore::default()),
        })
    }

    fn analyze_body() -> Value {
        json!({
            "job_title": "Rust CLI tool",
            "job_description": "Parse CSV files and print a report",
            "budget": "$500",
            "skills": "Rust",
            "user_profile": "Systems programmer",
            "user_skills": "Rust, C"
        })
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request")
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("parse json")
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = router_with(None)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_structured_result() {
        let generator = FakeGenerator::replying(
            r#"```json
{
  "proposal": "Hi, I can build this CLI.",
  "spec_sheet_prompt": "Write a spec for a CSV report tool",
  "time_estimate": {"total_hours": 12},
  "workload_division": "70% AI agents, 30% human",
  "questions_for_client": ["What columns matter?"],
  "tips_and_advice": ["Agree on sample files"],
  "tone_analysis": "Direct"
}
```"#,
        );
        let app = router_with(Some(generator.clone()));

        let response = app
            .oneshot(json_request("POST", "/api/analyze-job", &analyze_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["proposal"], "Hi, I can build this CLI.");
        assert_eq!(body["time_estimate"]["total_hours"], 12);
        assert_eq!(body["workload_division"], "70% AI agents, 30% human");
        assert_eq!(body["questions_for_client"][0], "What columns matter?");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_degraded_output_is_still_ok() {
        let app = router_with(Some(FakeGenerator::replying("plain prose answer")));

        let response = app
            .oneshot(json_request("POST", "/api/analyze-job", &analyze_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["proposal"], "plain prose answer");
        assert_eq!(body["spec_sheet_prompt"], PARSE_FAILURE_NOTICE);
        assert_eq!(body["time_estimate"], "");
        assert_eq!(body["questions_for_client"], json!([]));
        assert_eq!(body["tips_and_advice"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_rejects_other_methods_without_calling_model() {
        let generator = FakeGenerator::replying("{}");
        let app = router_with(Some(generator.clone()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/analyze-job")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "METHOD_NOT_ALLOWED"
        );
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_malformed_body_is_bad_request() {
        let generator = FakeGenerator::replying("{}");
        let app = router_with(Some(generator.clone()));

        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze-job")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INVALID_INPUT");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_missing_required_field_is_bad_request() {
        let app = router_with(Some(FakeGenerator::replying("{}")));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/analyze-job",
                &json!({"job_title": "Only a title"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_without_model_client_is_service_unavailable() {
        let response = router_with(None)
            .oneshot(json_request("POST", "/api/analyze-job", &analyze_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            json_body(response).await["error"]["code"],
            "SERVICE_UNAVAILABLE"
        );
    }

    #[tokio::test]
    async fn test_analyze_model_failure_is_internal_error() {
        let response = router_with(Some(FakeGenerator::failing()))
            .oneshot(json_request("POST", "/api/analyze-job", &analyze_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_profile_is_empty_before_first_save() {
        let response = router_with(None)
            .oneshot(
                Request::builder()
                    .uri("/api/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"description": "", "skills": "", "portfolio_items": []})
        );
    }

    #[tokio::test]
    async fn test_profile_save_skips_blank_items_and_round_trips() {
        let app = router_with(None);

        let save = json!({
            "description": "Full-stack developer",
            "skills": "Go, React",
            "portfolio_items": [
                {"title": "Shop", "link": "https://shop.example", "description": "E-commerce"},
                {"title": "  ", "link": "", "description": "\n"},
                {"title": "", "link": "https://blog.example", "description": ""}
            ]
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/profile", &save))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let saved = json_body(response).await;
        let items = saved["portfolio_items"].as_array().expect("items array");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "Shop");
        assert_eq!(items[1]["link"], "https://blog.example");
        assert!(items[0]["id"].is_string());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let loaded = json_body(response).await;
        assert_eq!(loaded["description"], "Full-stack developer");
        assert_eq!(loaded["portfolio_items"], saved["portfolio_items"]);
    }

    #[tokio::test]
    async fn test_profile_put_replaces_portfolio() {
        let app = router_with(None);

        let first = json!({
            "description": "v1",
            "skills": "Go",
            "portfolio_items": [{"title": "Old", "link": "", "description": ""}]
        });
        app.clone()
            .oneshot(json_request("POST", "/api/profile", &first))
            .await
            .unwrap();

        let second = json!({"description": "v2", "skills": "Rust"});
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/api/profile", &second))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["description"], "v2");
        assert_eq!(body["skills"], "Rust");
        assert_eq!(body["portfolio_items"], json!([]));
    }

    #[tokio::test]
    async fn test_profile_rejects_delete() {
        let response = router_with(None)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = router_with(None)
            .oneshot(
                Request::builder()
                    .uri("/api/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
