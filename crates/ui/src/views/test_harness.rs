use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AnswerService, ApiError, SessionService, TaskService, WorksheetApi};
use storage::repository::{DEFAULT_SCOPE, Storage};
use vdesk_core::model::{OptionId, SessionToken, Task, TaskId, TaskOption, TokenError};

use crate::context::{UiApp, build_app_context};
use crate::views::WorksheetView;
use crate::views::worksheet::{Selection, WorksheetTestHandles};
use crate::vm::WorksheetState;

fn request_failed() -> ApiError {
    ApiError::InvalidPayload(TokenError::Empty.into())
}

/// Scripted backend. `None` makes the matching call fail.
#[derive(Default)]
pub struct StubApi {
    pub token: Option<&'static str>,
    pub tasks: Option<Vec<Task>>,
    pub verdicts: HashMap<(i64, i64), bool>,
    pub fail_answers: bool,
    /// Answers for this option wait for the notify before returning.
    pub held_option: Option<(i64, Arc<Notify>)>,
    pub session_calls: AtomicUsize,
    pub task_calls: AtomicUsize,
    pub answer_calls: AtomicUsize,
}

impl StubApi {
    pub fn working() -> Self {
        Self {
            token: Some("abc123"),
            tasks: Some(vec![arithmetic_task(), colour_task()]),
            verdicts: HashMap::from([((1, 2), true), ((1, 1), false), ((2, 11), true)]),
            ..Self::default()
        }
    }

    pub fn session_calls(&self) -> usize {
        self.session_calls.load(Ordering::SeqCst)
    }

    pub fn answer_calls(&self) -> usize {
        self.answer_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorksheetApi for StubApi {
    async fn acquire_session(&self) -> Result<SessionToken, ApiError> {
        self.session_calls.fetch_add(1, Ordering::SeqCst);
        let raw = self.token.ok_or_else(request_failed)?;
        Ok(SessionToken::new(raw).map_err(vdesk_core::Error::from)?)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.task_calls.fetch_add(1, Ordering::SeqCst);
        self.tasks.clone().ok_or_else(request_failed)
    }

    async fn submit_answer(
        &self,
        _token: &SessionToken,
        task_id: TaskId,
        option_id: OptionId,
    ) -> Result<bool, ApiError> {
        self.answer_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((held, release)) = &self.held_option {
            if *held == option_id.value() {
                release.notified().await;
            }
        }
        if self.fail_answers {
            return Err(request_failed());
        }
        Ok(self
            .verdicts
            .get(&(task_id.value(), option_id.value()))
            .copied()
            .unwrap_or(false))
    }
}

pub fn arithmetic_task() -> Task {
    Task::new(
        TaskId::new(1),
        "2+2=?",
        vec![
            TaskOption::new(OptionId::new(1), "3"),
            TaskOption::new(OptionId::new(2), "4"),
        ],
    )
    .expect("valid task")
}

pub fn colour_task() -> Task {
    Task::new(
        TaskId::new(2),
        "Pick blue",
        vec![
            TaskOption::new(OptionId::new(10), "red"),
            TaskOption::new(OptionId::new(11), "blue"),
        ],
    )
    .expect("valid task")
}

struct TestApp {
    initial_token: Option<SessionToken>,
    session: Arc<SessionService>,
    tasks: Arc<TaskService>,
    answers: Arc<AnswerService>,
}

impl UiApp for TestApp {
    fn initial_token(&self) -> Option<SessionToken> {
        self.initial_token.clone()
    }

    fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.session)
    }

    fn tasks(&self) -> Arc<TaskService> {
        Arc::clone(&self.tasks)
    }

    fn answers(&self) -> Arc<AnswerService> {
        Arc::clone(&self.answers)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: WorksheetTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { WorksheetView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub api: Arc<StubApi>,
    handles: WorksheetTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until spawned requests have had a chance to finish.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn state(&self) -> WorksheetState {
        let state = self.handles.state();
        self.dom.in_runtime(|| state.peek().clone())
    }

    pub async fn start(&mut self) {
        let load = self.handles.load();
        self.dom.in_runtime(|| load.call(()));
        self.settle().await;
    }

    pub async fn select(&mut self, task_id: i64, option_id: i64) {
        let submit = self.handles.submit();
        let selection: Selection = (TaskId::new(task_id), OptionId::new(option_id));
        self.dom.in_runtime(|| submit.call(selection));
        self.settle().await;
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Build a worksheet view over `api`. The initial token is restored from
/// `storage` the same way the desktop shell does it.
pub async fn setup_view_harness_with_storage(api: StubApi, storage: Storage) -> ViewHarness {
    let api = Arc::new(api);
    let dyn_api: Arc<dyn WorksheetApi> = api.clone();
    let session = Arc::new(SessionService::new(
        Arc::clone(&dyn_api),
        Arc::clone(&storage.session),
        DEFAULT_SCOPE,
    ));
    let initial_token = session.restore().await.expect("restore token");
    let app = Arc::new(TestApp {
        initial_token,
        session,
        tasks: Arc::new(TaskService::new(Arc::clone(&dyn_api))),
        answers: Arc::new(AnswerService::new(dyn_api)),
    });
    let handles = WorksheetTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        api,
        handles,
    }
}

pub async fn setup_view_harness(api: StubApi) -> ViewHarness {
    setup_view_harness_with_storage(api, Storage::in_memory()).await
}
