//! Route handlers

use super::AppState;
use super::dto::{TaskBody, TaskResponse};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use cascade_application::{HandleTaskError, TaskRequest};
use cascade_domain::CascadeTask;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// Liveness only; says nothing about backend health.
pub async fn health() -> &'static str {
    "ok"
}

pub async fn submit_task(
    State(state): State<AppState>,
    body: Result<Json<TaskBody>, JsonRejection>,
) -> (StatusCode, Json<TaskResponse>) {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            let response = TaskResponse::InvalidRequest {
                error: rejection.body_text(),
            };
            return (rejection.status(), Json(response));
        }
    };

    let task_id = Uuid::new_v4().to_string();
    let span = info_span!("http.task", task_id = %task_id, start_tier = body.start_tier);

    async move {
        let mut task = CascadeTask::new(body.prompt);
        if let Some(system) = body.system {
            task = task.with_system(system);
        }
        let request =
            TaskRequest::new(body.auth_token, body.start_tier, task).with_task_id(task_id.clone());

        let response = match state.handler.handle(request).await {
            Ok(report) => TaskResponse::completed(&report),
            Err(HandleTaskError::Unauthorized) => TaskResponse::unauthorized(),
            Err(HandleTaskError::Cascade(error)) => TaskResponse::exhausted(Some(&task_id), &error),
        };

        let status = response.status_code();
        info!(status = status.as_u16(), "Task finished");
        (status, Json(response))
    }
    .instrument(span)
    .await
}
