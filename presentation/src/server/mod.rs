//! HTTP surface
//!
//! | Method | Path        | Purpose                                  |
//! |--------|-------------|------------------------------------------|
//! | GET    | `/health`   | Liveness probe                           |
//! | POST   | `/v1/tasks` | Authorize and run one task through tiers |

pub mod dto;
mod handlers;

use axum::Router;
use axum::routing::{get, post};
use cascade_application::HandleTaskUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    handler: Arc<HandleTaskUseCase>,
}

pub fn router(handler: Arc<HandleTaskUseCase>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/v1/tasks", post(handlers::submit_task))
        .with_state(AppState { handler })
}

/// Serve `router` on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cascade_application::{Authorizer, Invoker, NoSleep, RunCascadeUseCase};
    use cascade_domain::{CascadeTask, Completion, Outcome, Tier, TierMap};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    // ==================== Test Mocks ====================

    struct FixedToken;

    impl Authorizer for FixedToken {
        fn authorize(&self, token: &str) -> bool {
            token == "letmein"
        }
    }

    /// Defers below `completes_at`, completes there, fails above.
    struct StairInvoker {
        completes_at: u8,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Invoker for StairInvoker {
        async fn invoke(&self, tier: Tier, task: &CascadeTask) -> Outcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if tier.get() < self.completes_at {
                Outcome::Deferred
            } else if tier.get() == self.completes_at {
                let backend = TierMap::defaults().backend(tier).clone();
                Outcome::Completed(Completion::new(format!("echo: {}", task.prompt), tier, backend))
            } else {
                Outcome::failed("HTTP 500")
            }
        }
    }

    fn app(completes_at: u8) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let invoker = Arc::new(StairInvoker {
            completes_at,
            calls: calls.clone(),
        });
        let cascade =
            RunCascadeUseCase::new(Arc::new(TierMap::defaults()), invoker, Arc::new(NoSleep));
        let handler = Arc::new(HandleTaskUseCase::new(Arc::new(FixedToken), cascade));
        (router(handler), calls)
    }

    fn post_task(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/tasks")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(1);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_completed_task() {
        let (app, calls) = app(4);
        let response = app
            .oneshot(post_task(serde_json::json!({
                "auth_token": "letmein",
                "start_tier": 2,
                "prompt": "ping"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "completed");
        assert_eq!(body["tier"], 4);
        assert_eq!(body["provider"], "openai");
        assert_eq!(body["model"], "gpt-4.1-nano");
        assert_eq!(body["output"], "echo: ping");
        assert_eq!(body["attempts"], serde_json::json!([2, 3, 4]));
        assert!(body["task_id"].as_str().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_bad_token_is_rejected_before_any_call() {
        let (app, calls) = app(1);
        let response = app
            .oneshot(post_task(serde_json::json!({
                "auth_token": "nope",
                "start_tier": 1,
                "prompt": "ping"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["status"], "unauthorized");
        assert!(body["error"].as_str().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhausted_task_is_bad_gateway() {
        // Every tier fails: 9, the retreat to 8, then the climb to 10
        let (app, _) = app(0);
        let response = app
            .oneshot(post_task(serde_json::json!({
                "auth_token": "letmein",
                "start_tier": 9,
                "prompt": "ping"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["status"], "exhausted");
        assert_eq!(body["attempts"], serde_json::json!([9, 8, 10]));
    }

    #[tokio::test]
    async fn test_oversized_start_tier_saturates_to_top() {
        let (app, calls) = app(10);
        let response = app
            .oneshot(post_task(serde_json::json!({
                "auth_token": "letmein",
                "start_tier": 1e20,
                "prompt": "ping"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["attempts"], serde_json::json!([10]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, calls) = app(1);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/tasks")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], "invalid_request");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
