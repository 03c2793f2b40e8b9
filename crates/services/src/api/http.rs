use async_trait::async_trait;
use reqwest::{Client, Response};

use vdesk_core::model::{OptionId, SessionToken, Task, TaskId};

use super::WorksheetApi;
use super::wire::{AnswerRequest, AnswerResponse, SessionResponse, TaskPayload};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// `WorksheetApi` over HTTP with `reqwest`.
///
/// No retries and no request timeout: a call either completes or stays
/// pending.
#[derive(Clone)]
pub struct HttpWorksheetApi {
    client: Client,
    config: ApiConfig,
}

impl HttpWorksheetApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::HttpStatus(response.status()))
    }
}

#[async_trait]
impl WorksheetApi for HttpWorksheetApi {
    async fn acquire_session(&self) -> Result<SessionToken, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint("/api/session"))
            .send()
            .await?;
        let body: SessionResponse = ensure_success(response)?.json().await?;
        body.into_token()
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint("/api/tasks"))
            .send()
            .await?;
        let body: Vec<TaskPayload> = ensure_success(response)?.json().await?;
        body.into_iter().map(TaskPayload::into_task).collect()
    }

    async fn submit_answer(
        &self,
        token: &SessionToken,
        task_id: TaskId,
        option_id: OptionId,
    ) -> Result<bool, ApiError> {
        let url = self
            .config
            .endpoint(&format!("/api/task/{task_id}/answer"));
        let payload = AnswerRequest {
            option_id: option_id.value(),
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(token.as_str())
            .json(&payload)
            .send()
            .await?;

        let body: AnswerResponse = ensure_success(response)?.json().await?;
        Ok(body.correct)
    }
}
