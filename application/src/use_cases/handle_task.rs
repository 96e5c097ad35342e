//! Handle Task use case.
//!
//! The session-facing surface: checks the caller's credential once, then hands
//! the task to the [`RunCascadeUseCase`].

use super::run_cascade::{CascadeError, CascadeReport, RunCascadeInput, RunCascadeUseCase};
use crate::ports::authorizer::Authorizer;
use crate::ports::progress::{CascadeProgressNotifier, NoProgress};
use cascade_domain::CascadeTask;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleTaskError {
    #[error("Unauthorized: invalid or missing auth token")]
    Unauthorized,

    #[error(transparent)]
    Cascade(#[from] CascadeError),
}

/// An incoming task together with the caller's credential.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub auth_token: String,
    pub start_tier: i64,
    pub task: CascadeTask,
    /// Caller-assigned id; a fresh one is generated when absent.
    pub task_id: Option<String>,
}

impl TaskRequest {
    pub fn new(auth_token: impl Into<String>, start_tier: i64, task: CascadeTask) -> Self {
        Self {
            auth_token: auth_token.into(),
            start_tier,
            task,
            task_id: None,
        }
    }

    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }
}

/// Completed task as returned to the caller.
pub type TaskReport = CascadeReport;

pub struct HandleTaskUseCase {
    authorizer: Arc<dyn Authorizer>,
    cascade: RunCascadeUseCase,
}

impl HandleTaskUseCase {
    pub fn new(authorizer: Arc<dyn Authorizer>, cascade: RunCascadeUseCase) -> Self {
        Self {
            authorizer,
            cascade,
        }
    }

    pub fn cascade(&self) -> &RunCascadeUseCase {
        &self.cascade
    }

    pub async fn handle(&self, request: TaskRequest) -> Result<TaskReport, HandleTaskError> {
        self.handle_with_progress(request, &NoProgress).await
    }

    pub async fn handle_with_progress(
        &self,
        request: TaskRequest,
        progress: &dyn CascadeProgressNotifier,
    ) -> Result<TaskReport, HandleTaskError> {
        if !self.authorizer.authorize(&request.auth_token) {
            warn!("Rejected task: authorization failed");
            return Err(HandleTaskError::Unauthorized);
        }

        let mut input = RunCascadeInput::new(request.start_tier, request.task);
        if let Some(task_id) = request.task_id {
            input = input.with_task_id(task_id);
        }
        info!(task_id = %input.task_id, "Accepted task");

        Ok(self.cascade.execute_with_progress(input, progress).await?)
    }
}
