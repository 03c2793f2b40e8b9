mod answer;
mod ids;
mod task;
mod token;
mod worksheet;

pub use answer::AnswerResult;
pub use ids::{OptionId, TaskId};
pub use task::{Task, TaskError, TaskOption};
pub use token::{SessionToken, TokenError};
pub use worksheet::{Worksheet, WorksheetError, validate_task_set};
