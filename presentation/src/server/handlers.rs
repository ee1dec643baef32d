//! HTTP handlers

use super::error::ApiError;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use triage_application::{RunQueryInput, RunQueryUseCase};
use triage_domain::{Domain, RunOutcome};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<RunQueryUseCase>,
}

impl AppState {
    pub fn new(use_case: Arc<RunQueryUseCase>) -> Self {
        Self { use_case }
    }
}

/// `POST /query` body
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

/// `POST /query` success body
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub result: QueryResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResult {
    pub text: String,
    pub domain: Domain,
    pub accepted: bool,
}

impl From<RunOutcome> for QueryResponse {
    fn from(outcome: RunOutcome) -> Self {
        Self {
            result: QueryResult {
                text: outcome.text,
                domain: outcome.domain,
                accepted: outcome.accepted,
            },
        }
    }
}

/// Health check
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Answer one query.
///
/// A dropped connection drops this future, which abandons the run.
async fn query(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        debug!("Rejected request body: {}", rejection);
        ApiError::bad_request(rejection.body_text())
    })?;

    match state
        .use_case
        .execute(RunQueryInput::new(request.query))
        .await
    {
        Ok(outcome) => Ok(Json(outcome.into())),
        Err(e) => {
            if e.is_invalid_input() {
                debug!("Invalid query: {}", e);
            } else {
                error!("Query failed: {}", e);
            }
            Err(e.into())
        }
    }
}

/// Build the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/query", post(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tower::ServiceExt;
    use triage_application::{
        Answer, ClassifyUseCase, EvaluateUseCase, GatewayError, LlmGateway, Responder,
        ResponderError, ResponderRegistry, RunProgressNotifier,
    };
    use triage_domain::CompletionRequest;

    // ==================== Test Mocks ====================

    struct MockGateway {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    }

    impl MockGateway {
        fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        fn model(&self) -> &str {
            "mock"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    struct EchoResponder(Domain);

    #[async_trait]
    impl Responder for EchoResponder {
        fn domain(&self) -> Domain {
            self.0
        }

        async fn respond(
            &self,
            query: &str,
            _progress: &dyn RunProgressNotifier,
        ) -> Result<Answer, ResponderError> {
            Ok(Answer::new(format!("{} answer to: {}", self.0.label(), query)))
        }
    }

    fn app(classifier: Vec<Result<String, GatewayError>>, evaluator: &[&str]) -> Router {
        let registry = ResponderRegistry::new(Arc::new(EchoResponder(Domain::General)))
            .with_responder(Arc::new(EchoResponder(Domain::It)));
        let use_case = RunQueryUseCase::new(
            ClassifyUseCase::new(Arc::new(MockGateway::new(classifier))),
            registry,
            EvaluateUseCase::new(Arc::new(MockGateway::new(
                evaluator.iter().map(|r| Ok(r.to_string())).collect(),
            ))),
        );
        create_router().with_state(AppState::new(Arc::new(use_case)))
    }

    fn post_query(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/query")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_query_success() {
        let response = app(vec![Ok("IT".to_string())], &["YES"])
            .oneshot(post_query(r#"{"query": "How do I reset my VPN password?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["result"]["domain"], "itAgent");
        assert_eq!(body["result"]["accepted"], true);
        assert_eq!(
            body["result"]["text"],
            "IT answer to: How do I reset my VPN password?"
        );
    }

    #[tokio::test]
    async fn test_blank_query_is_bad_request() {
        let response = app(vec![Ok("IT".to_string())], &["YES"])
            .oneshot(post_query(r#"{"query": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app(vec![], &[])
            .oneshot(post_query("not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failure_is_generic_500() {
        let response = app(
            vec![Err(GatewayError::ConnectionError("secret host".to_string()))],
            &[],
        )
        .oneshot(post_query(r#"{"query": "vpn"}"#))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(vec![], &[])
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
