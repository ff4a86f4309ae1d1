use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::NotFound(_) => Self::not_found(err.to_string()),
            _ => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failure of the backing key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why the recent teams list could not be loaded or saved.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("recent teams payload is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("recent teams payload is not an array")]
    NotAnArray,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("team name is required")]
    BlankTeamName,
    #[error("team name cannot exceed {max} characters")]
    TeamNameTooLong { max: usize },
    #[error("end time must be later than start time")]
    InvalidTimeRange,
    #[error("{field} is missing or malformed")]
    Unparsable { field: &'static str },
    #[error("schedule not found with id: {0}")]
    NotFound(u64),
}

impl ScheduleError {
    /// Short code carried through redirects so the page can show the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankTeamName => "blank_name",
            Self::TeamNameTooLong { .. } => "name_too_long",
            Self::InvalidTimeRange => "invalid_time",
            Self::Unparsable { .. } => "invalid_input",
            Self::NotFound(_) => "not_found",
        }
    }
}
