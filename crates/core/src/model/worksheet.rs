use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::answer::AnswerResult;
use crate::model::ids::{OptionId, TaskId};
use crate::model::task::Task;

/// The loaded task set plus one optional result per task.
///
/// Every stored result references an option of its own task. The task set is
/// only ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worksheet {
    tasks: Vec<Task>,
    results: HashMap<TaskId, AnswerResult>,
}

impl Worksheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole task set.
    ///
    /// Results whose task or selected option is missing from the new set are
    /// dropped. On error the worksheet is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::DuplicateTask` if two tasks share an id.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> Result<(), WorksheetError> {
        validate_task_set(&tasks)?;

        self.results.retain(|task_id, result| {
            tasks
                .iter()
                .find(|task| task.id() == *task_id)
                .is_some_and(|task| task.has_option(result.selected()))
        });
        self.tasks = tasks;
        Ok(())
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check that `option_id` belongs to `task_id`.
    ///
    /// # Errors
    ///
    /// Returns `WorksheetError::UnknownTask` or `WorksheetError::OptionNotInTask`.
    pub fn check_selection(
        &self,
        task_id: TaskId,
        option_id: OptionId,
    ) -> Result<&Task, WorksheetError> {
        let task = self
            .task(task_id)
            .ok_or(WorksheetError::UnknownTask(task_id))?;
        if !task.has_option(option_id) {
            return Err(WorksheetError::OptionNotInTask { task_id, option_id });
        }
        Ok(task)
    }

    /// Store the result for a task, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Worksheet::check_selection`].
    pub fn record(&mut self, task_id: TaskId, result: AnswerResult) -> Result<(), WorksheetError> {
        self.check_selection(task_id, result.selected())?;
        self.results.insert(task_id, result);
        Ok(())
    }

    #[must_use]
    pub fn result(&self, task_id: TaskId) -> Option<AnswerResult> {
        self.results.get(&task_id).copied()
    }

}

/// Check that task ids are unique across a task set.
///
/// # Errors
///
/// Returns `WorksheetError::DuplicateTask` naming the first repeated id.
pub fn validate_task_set(tasks: &[Task]) -> Result<(), WorksheetError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id()) {
            return Err(WorksheetError::DuplicateTask(task.id()));
        }
    }
    Ok(())
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorksheetError {
    #[error("task {0} appears more than once in the task set")]
    DuplicateTask(TaskId),
    #[error("task {0} is not part of the loaded worksheet")]
    UnknownTask(TaskId),
    #[error("option {option_id} does not belong to task {task_id}")]
    OptionNotInTask { task_id: TaskId, option_id: OptionId },
}
