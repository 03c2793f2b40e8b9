use std::sync::Arc;

use services::{AnswerService, SessionService, TaskService};
use vdesk_core::model::SessionToken;

pub trait UiApp: Send + Sync {
    /// Token restored from tab storage before the first render, if any.
    fn initial_token(&self) -> Option<SessionToken>;

    fn session(&self) -> Arc<SessionService>;
    fn tasks(&self) -> Arc<TaskService>;
    fn answers(&self) -> Arc<AnswerService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_token: Option<SessionToken>,

    session: Arc<SessionService>,
    tasks: Arc<TaskService>,
    answers: Arc<AnswerService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_token: app.initial_token(),
            session: app.session(),
            tasks: app.tasks(),
            answers: app.answers(),
        }
    }

    #[must_use]
    pub fn initial_token(&self) -> Option<SessionToken> {
        self.initial_token.clone()
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
