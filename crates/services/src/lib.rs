#![forbid(unsafe_code)]

pub mod answer_service;
pub mod api;
pub mod app_services;
pub mod config;
pub mod error;
pub mod session_service;
pub mod task_service;

pub use answer_service::AnswerService;
pub use api::{HttpWorksheetApi, WorksheetApi};
pub use app_services::AppServices;
pub use config::{API_URL_ENV, ApiConfig, DEFAULT_API_URL};
pub use error::{AnswerError, ApiError, ConfigError, SessionError, TaskLoadError};
pub use session_service::SessionService;
pub use task_service::TaskService;
