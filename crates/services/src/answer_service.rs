use std::sync::Arc;

use tracing::debug;
use vdesk_core::model::{AnswerResult, OptionId, SessionToken, Task, WorksheetError};

use crate::api::WorksheetApi;
use crate::error::AnswerError;

/// Sends a selected option to the backend and turns the verdict into a result.
#[derive(Clone)]
pub struct AnswerService {
    api: Arc<dyn WorksheetApi>,
}

impl AnswerService {
    #[must_use]
    pub fn new(api: Arc<dyn WorksheetApi>) -> Self {
        Self { api }
    }

    /// Submit `option_id` for `task`.
    ///
    /// Preconditions are checked before any request is made. Re-submitting
    /// for an answered task is allowed; the caller overwrites the old result.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::MissingToken` without a token,
    /// `AnswerError::Worksheet` if the option is not part of `task`, and
    /// `AnswerError::Api` if the request fails.
    pub async fn submit(
        &self,
        token: Option<&SessionToken>,
        task: &Task,
        option_id: OptionId,
    ) -> Result<AnswerResult, AnswerError> {
        let token = token.ok_or(AnswerError::MissingToken)?;
        if !task.has_option(option_id) {
            return Err(WorksheetError::OptionNotInTask {
                task_id: task.id(),
                option_id,
            }
            .into());
        }

        let correct = self
            .api
            .submit_answer(token, task.id(), option_id)
            .await?;
        debug!(task_id = %task.id(), option_id = %option_id, correct, "answer graded");
        Ok(AnswerResult::new(option_id, correct))
    }
}
