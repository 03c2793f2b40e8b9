use dioxus::prelude::*;
use tracing::{error, warn};
use vdesk_core::model::{OptionId, TaskId};

use crate::context::AppContext;
use crate::vm::{OptionVm, TaskCardVm, WorksheetState, WorksheetVm, map_worksheet};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// A selection made on a task card.
pub type Selection = (TaskId, OptionId);

#[component]
pub fn WorksheetView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_signal(|| WorksheetState::new(ctx.initial_token()));

    // Runs once per mount. `resolve` re-reads tab storage first, so a token
    // stored by an earlier mount is reused without a request.
    let session = ctx.session();
    use_hook(move || {
        if !state.peek().needs_token() {
            return;
        }
        let mut state = state;
        spawn(async move {
            match session.resolve().await {
                Ok(token) => state.write().set_token(token),
                Err(err) => error!(error = %err, "failed to get session token"),
            }
        });
    });

    let load_tasks = {
        let tasks = ctx.tasks();
        use_callback(move |()| {
            let tasks = tasks.clone();
            let mut state = state;
            spawn(async move {
                match tasks.load().await {
                    Ok(loaded) => {
                        if let Err(err) = state.write().replace_tasks(loaded) {
                            error!(error = %err, "error loading tasks");
                        }
                    }
                    Err(err) => error!(error = %err, "error loading tasks"),
                }
            });
        })
    };

    let submit_answer = {
        let answers = ctx.answers();
        use_callback(move |(task_id, option_id): Selection| {
            let answers = answers.clone();
            let mut state = state;
            let (token, task) = {
                let guard = state.peek();
                (
                    guard.token().cloned(),
                    guard.worksheet().task(task_id).cloned(),
                )
            };
            let Some(task) = task else {
                warn!(task_id = %task_id, "answer for a task that is not loaded");
                return;
            };
            spawn(async move {
                match answers.submit(token.as_ref(), &task, option_id).await {
                    Ok(result) => {
                        // The task set may have been replaced while the request was in flight.
                        if let Err(err) = state.write().record(task_id, result) {
                            warn!(task_id = %task_id, error = %err, "dropping stale answer");
                        }
                    }
                    Err(err) => {
                        error!(
                            task_id = %task_id,
                            option_id = %option_id,
                            error = %err,
                            "answer submission failed"
                        );
                    }
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<WorksheetTestHandles>() {
                handles.register(load_tasks, submit_answer, state);
            }
        }
    }

    let vm = map_worksheet(&state.read());
    rsx! {
        div { class: "worksheet",
            match vm {
                WorksheetVm::Start(panel) => rsx! {
                    StartPanel {
                        token_label: panel.token_label,
                        resolved: panel.resolved,
                        on_start: load_tasks,
                    }
                },
                WorksheetVm::Tasks(cards) => rsx! {
                    div { class: "task-list",
                        for card in cards {
                            TaskCard { key: "{card.id}", card: card.clone(), on_select: submit_answer }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn StartPanel(token_label: String, resolved: bool, on_start: EventHandler<()>) -> Element {
    let token_class = if resolved {
        "session-token"
    } else {
        "session-token session-token--pending"
    };
    rsx! {
        div { class: "start-panel",
            div { class: "session-badge",
                span { class: "session-badge-label", "Authenticated Session" }
                code { class: "{token_class}", "{token_label}" }
            }
            button {
                class: "btn btn-primary start-button",
                id: "start-worksheet",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "START WORKSHEET"
            }
        }
    }
}

#[component]
fn TaskCard(card: TaskCardVm, on_select: EventHandler<Selection>) -> Element {
    let task_id = card.id;
    let card_class = if card.answered {
        "task-card task-card--answered"
    } else {
        "task-card"
    };
    rsx! {
        div { class: "{card_class}",
            h3 { class: "task-title",
                span { class: "task-ordinal", "{card.ordinal_label}" }
                "{card.instruction}"
            }
            div { class: "task-options",
                for option in card.options.iter().cloned() {
                    OptionButton { key: "{option.id}", task_id, option, on_select }
                }
            }
        }
    }
}

#[component]
fn OptionButton(task_id: TaskId, option: OptionVm, on_select: EventHandler<Selection>) -> Element {
    let option_id = option.id;
    let class = option.status.class();
    let mark = option.status.mark();
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            "data-task": "{task_id}",
            "data-option": "{option_id}",
            onclick: move |_| on_select.call((task_id, option_id)),
            span { class: "option-text", "{option.text}" }
            if let Some(mark) = mark {
                span { class: "option-mark", "{mark}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct WorksheetTestHandles {
    load: Rc<RefCell<Option<Callback<()>>>>,
    submit: Rc<RefCell<Option<Callback<Selection>>>>,
    state: Rc<RefCell<Option<Signal<WorksheetState>>>>,
}

#[cfg(test)]
impl WorksheetTestHandles {
    pub(crate) fn register(
        &self,
        load: Callback<()>,
        submit: Callback<Selection>,
        state: Signal<WorksheetState>,
    ) {
        *self.load.borrow_mut() = Some(load);
        *self.submit.borrow_mut() = Some(submit);
        *self.state.borrow_mut() = Some(state);
    }

    pub(crate) fn load(&self) -> Callback<()> {
        (*self.load.borrow()).expect("load callback registered")
    }

    pub(crate) fn submit(&self) -> Callback<Selection> {
        (*self.submit.borrow()).expect("submit callback registered")
    }

    pub(crate) fn state(&self) -> Signal<WorksheetState> {
        (*self.state.borrow()).expect("worksheet state registered")
    }
}
