use std::sync::Arc;

use tracing::info;
use vdesk_core::model::{Task, validate_task_set};

use crate::api::WorksheetApi;
use crate::error::TaskLoadError;

#[derive(Clone)]
pub struct TaskService {
    api: Arc<dyn WorksheetApi>,
}

impl TaskService {
    #[must_use]
    pub fn new(api: Arc<dyn WorksheetApi>) -> Self {
        Self { api }
    }

    /// Fetch the full task set in one call.
    ///
    /// # Errors
    ///
    /// Returns `TaskLoadError` if the request fails or the set repeats a task id.
    pub async fn load(&self) -> Result<Vec<Task>, TaskLoadError> {
        let tasks = self.api.list_tasks().await?;
        validate_task_set(&tasks)?;
        info!(count = tasks.len(), "loaded worksheet tasks");
        Ok(tasks)
    }
}
