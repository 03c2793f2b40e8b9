use vdesk_core::model::{
    AnswerResult, OptionId, SessionToken, Task, TaskId, Worksheet, WorksheetError,
};

/// Shown in place of the token until one is resolved.
pub const TOKEN_PLACEHOLDER: &str = "Resolving...";

/// Everything the worksheet screen renders from.
///
/// Lives in a single signal; every transition goes through one of the methods
/// below and triggers a rerender.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorksheetState {
    token: Option<SessionToken>,
    worksheet: Worksheet,
}

impl WorksheetState {
    #[must_use]
    pub fn new(token: Option<SessionToken>) -> Self {
        Self {
            token,
            worksheet: Worksheet::new(),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn needs_token(&self) -> bool {
        self.token.is_none()
    }

    pub fn set_token(&mut self, token: SessionToken) {
        self.token = Some(token);
    }

    #[must_use]
    pub fn worksheet(&self) -> &Worksheet {
        &self.worksheet
    }

    /// # Errors
    ///
    /// Returns `WorksheetError` if the new set repeats a task id; state is unchanged.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> Result<(), WorksheetError> {
        self.worksheet.replace_tasks(tasks)
    }

    /// # Errors
    ///
    /// Returns `WorksheetError` if the result does not fit the loaded tasks.
    pub fn record(&mut self, task_id: TaskId, result: AnswerResult) -> Result<(), WorksheetError> {
        self.worksheet.record(task_id, result)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionStatus {
    /// Task not answered yet.
    Open,
    Correct,
    Incorrect,
    /// Task answered with a different option.
    Dimmed,
}

impl OptionStatus {
    #[must_use]
    pub fn for_option(result: Option<AnswerResult>, option: OptionId) -> Self {
        match result {
            None => Self::Open,
            Some(result) if !result.is_selected(option) => Self::Dimmed,
            Some(result) if result.is_correct() => Self::Correct,
            Some(_) => Self::Incorrect,
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "option option--open",
            Self::Correct => "option option--correct",
            Self::Incorrect => "option option--incorrect",
            Self::Dimmed => "option option--dimmed",
        }
    }

    #[must_use]
    pub fn mark(self) -> Option<&'static str> {
        match self {
            Self::Correct => Some("✓"),
            Self::Incorrect => Some("✗"),
            Self::Open | Self::Dimmed => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub id: OptionId,
    pub text: String,
    pub status: OptionStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskCardVm {
    pub id: TaskId,
    pub ordinal_label: String,
    pub instruction: String,
    pub options: Vec<OptionVm>,
    pub answered: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartPanelVm {
    pub token_label: String,
    pub resolved: bool,
}

/// The two top-level screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorksheetVm {
    Start(StartPanelVm),
    Tasks(Vec<TaskCardVm>),
}

#[must_use]
pub fn map_worksheet(state: &WorksheetState) -> WorksheetVm {
    let worksheet = state.worksheet();
    if worksheet.is_empty() {
        let token_label = state
            .token()
            .map_or_else(|| TOKEN_PLACEHOLDER.to_string(), ToString::to_string);
        return WorksheetVm::Start(StartPanelVm {
            token_label,
            resolved: state.token().is_some(),
        });
    }

    let cards = worksheet
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| map_task_card(index, task, worksheet.result(task.id())))
        .collect();
    WorksheetVm::Tasks(cards)
}

fn map_task_card(index: usize, task: &Task, result: Option<AnswerResult>) -> TaskCardVm {
    let options = task
        .options()
        .iter()
        .map(|option| OptionVm {
            id: option.id(),
            text: option.text().to_string(),
            status: OptionStatus::for_option(result, option.id()),
        })
        .collect();

    TaskCardVm {
        id: task.id(),
        ordinal_label: format!("#{}", index + 1),
        instruction: task.instruction().to_string(),
        options,
        answered: result.is_some(),
    }
}
