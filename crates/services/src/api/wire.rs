use serde::{Deserialize, Serialize};

use vdesk_core::model::{OptionId, SessionToken, Task, TaskId, TaskOption};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub(super) struct SessionResponse {
    token: String,
}

impl SessionResponse {
    pub(super) fn into_token(self) -> Result<SessionToken, ApiError> {
        SessionToken::new(self.token).map_err(|err| ApiError::InvalidPayload(err.into()))
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskPayload {
    id: i64,
    instruction: String,
    options: Vec<OptionPayload>,
}

#[derive(Debug, Deserialize)]
struct OptionPayload {
    id: i64,
    text: String,
}

impl TaskPayload {
    pub(super) fn into_task(self) -> Result<Task, ApiError> {
        let options = self
            .options
            .into_iter()
            .map(|option| TaskOption::new(OptionId::new(option.id), option.text))
            .collect();
        Task::new(TaskId::new(self.id), self.instruction, options)
            .map_err(|err| ApiError::InvalidPayload(err.into()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnswerRequest {
    pub(super) option_id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnswerResponse {
    pub(super) correct: bool,
}
