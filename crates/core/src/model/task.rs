use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::{OptionId, TaskId};

//
// ─── TASK TYPES ────────────────────────────────────────────────────────────────
//

/// One selectable answer choice belonging to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOption {
    id: OptionId,
    text: String,
}

impl TaskOption {
    #[must_use]
    pub fn new(id: OptionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> OptionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A worksheet question with an ordered set of options.
///
/// Option ids are unique within the task; construction enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    instruction: String,
    options: Vec<TaskOption>,
}

impl Task {
    /// Build a task from its parts.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::DuplicateOption` if two options share an id.
    pub fn new(
        id: TaskId,
        instruction: impl Into<String>,
        options: Vec<TaskOption>,
    ) -> Result<Self, TaskError> {
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.id()) {
                return Err(TaskError::DuplicateOption {
                    task_id: id,
                    option_id: option.id(),
                });
            }
        }

        Ok(Self {
            id,
            instruction: instruction.into(),
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    #[must_use]
    pub fn options(&self) -> &[TaskOption] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, id: OptionId) -> Option<&TaskOption> {
        self.options.iter().find(|option| option.id() == id)
    }

    #[must_use]
    pub fn has_option(&self, id: OptionId) -> bool {
        self.option(id).is_some()
    }
}

//
// ─── TASK ERRORS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaskError {
    #[error("task {task_id} lists option {option_id} more than once")]
    DuplicateOption { task_id: TaskId, option_id: OptionId },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
