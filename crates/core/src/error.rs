use thiserror::Error;

use crate::model::{TaskError, TokenError, WorksheetError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Worksheet(#[from] WorksheetError),
}
