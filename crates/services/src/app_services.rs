use std::sync::Arc;

use storage::repository::Storage;

use crate::answer_service::AnswerService;
use crate::api::{HttpWorksheetApi, WorksheetApi};
use crate::config::ApiConfig;
use crate::session_service::SessionService;
use crate::task_service::TaskService;

/// Assembles the app-facing services around one backend and one tab scope.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionService>,
    tasks: Arc<TaskService>,
    answers: Arc<AnswerService>,
}

impl AppServices {
    #[must_use]
    pub fn new(api: Arc<dyn WorksheetApi>, storage: &Storage, scope: &str) -> Self {
        let session = Arc::new(SessionService::new(
            Arc::clone(&api),
            Arc::clone(&storage.session),
            scope,
        ));
        let tasks = Arc::new(TaskService::new(Arc::clone(&api)));
        let answers = Arc::new(AnswerService::new(api));

        Self {
            session,
            tasks,
            answers,
        }
    }

    /// Build services talking HTTP to the configured backend.
    #[must_use]
    pub fn http(config: ApiConfig, storage: &Storage, scope: &str) -> Self {
        let api: Arc<dyn WorksheetApi> = Arc::new(HttpWorksheetApi::new(config));
        Self::new(api, storage, scope)
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn tasks(&self) -> Arc<TaskService> {
        Arc::clone(&self.tasks)
    }

    #[must_use]
    pub fn answers(&self) -> Arc<AnswerService> {
        Arc::clone(&self.answers)
    }
}
