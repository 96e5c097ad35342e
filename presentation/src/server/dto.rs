//! Request and response bodies of the task endpoint

use axum::http::StatusCode;
use cascade_application::{CascadeError, CascadeReport};
use cascade_domain::{ProviderKind, Tier};
use serde::{Deserialize, Deserializer, Serialize};

/// `POST /v1/tasks` body
#[derive(Debug, Clone, Deserialize)]
pub struct TaskBody {
    /// Missing tokens are treated as empty and rejected by the authorizer.
    #[serde(default)]
    pub auth_token: String,
    /// Any JSON integer; values beyond `i64` saturate before tier clamping.
    #[serde(deserialize_with = "saturating_integer")]
    pub start_tier: i64,
    pub prompt: String,
    #[serde(default)]
    pub system: Option<String>,
}

fn saturating_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    if number.is_u64() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        // `as` saturates at the i64 bounds
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(serde::de::Error::custom(format!(
            "start_tier must be an integer, got {number}"
        ))),
    }
}

/// Response envelope, tagged by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskResponse {
    Completed {
        task_id: String,
        tier: Tier,
        provider: ProviderKind,
        model: String,
        output: String,
        attempts: Vec<Tier>,
    },
    Unauthorized {
        error: String,
    },
    Exhausted {
        #[serde(skip_serializing_if = "Option::is_none")]
        task_id: Option<String>,
        error: String,
        attempts: Vec<Tier>,
    },
    InvalidRequest {
        error: String,
    },
    Error {
        error: String,
    },
}

impl TaskResponse {
    pub fn completed(report: &CascadeReport) -> Self {
        let completion = &report.completion;
        TaskResponse::Completed {
            task_id: report.task_id.clone(),
            tier: completion.tier,
            provider: completion.backend.provider,
            model: completion.backend.model.clone(),
            output: completion.output.clone(),
            attempts: report.attempts.clone(),
        }
    }

    pub fn unauthorized() -> Self {
        TaskResponse::Unauthorized {
            error: "invalid or missing auth token".to_string(),
        }
    }

    /// A session that ended without a completion.
    ///
    /// A misconfigured policy is a server fault, not an exhausted walk.
    pub fn exhausted(task_id: Option<&str>, error: &CascadeError) -> Self {
        match error {
            CascadeError::Exhausted { attempts, .. } => TaskResponse::Exhausted {
                task_id: task_id.map(str::to_string),
                error: error.to_string(),
                attempts: attempts.clone(),
            },
            CascadeError::InvalidPolicy(_) => TaskResponse::Error {
                error: error.to_string(),
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskResponse::Completed { .. } => StatusCode::OK,
            TaskResponse::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            TaskResponse::Exhausted { .. } => StatusCode::BAD_GATEWAY,
            TaskResponse::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            TaskResponse::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
