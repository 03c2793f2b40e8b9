//! Client side of the worksheet REST API.

use async_trait::async_trait;

use vdesk_core::model::{OptionId, SessionToken, Task, TaskId};

use crate::error::ApiError;

mod http;
mod wire;


pub use http::HttpWorksheetApi;

/// The three backend calls the worksheet needs.
#[async_trait]
pub trait WorksheetApi: Send + Sync {
    /// `GET /api/session`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the token is unusable.
    async fn acquire_session(&self) -> Result<SessionToken, ApiError>;

    /// `GET /api/tasks`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or a task is malformed.
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// `POST /api/task/{task_id}/answer`, authenticated with `token`.
    /// Returns whether the option was correct.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn submit_answer(
        &self,
        token: &SessionToken,
        task_id: TaskId,
        option_id: OptionId,
    ) -> Result<bool, ApiError>;
}
