use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    Reqwest(String),
    #[error("Filesystem I/O error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("JSON parsing error: {0}")]
    Parse(String),
    #[error("Image decoding error: {0}")]
    Image(String),
    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        status: u16,
        endpoint: String,
        body: String,
    },
    #[error("API rejected request to {endpoint}: {message}")]
    ApiRejected { endpoint: String, message: String },
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Invalid argument provided: {0}")]
    Argument(String),
    #[error("Tokio task join error: {0}")]
    JoinError(String),
    #[error("Semaphore acquisition error: {0}")]
    SemaphoreAcquire(String),
    #[error("Unexpected internal error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Reqwest(e.to_string())
    }
}
impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() || e.is_eof() || e.is_syntax() || e.is_data() {
            AppError::Parse(e.to_string())
        } else {
            AppError::Serialize(e.to_string())
        }
    }
}
impl From<serde_yml::Error> for AppError {
    fn from(e: serde_yml::Error) -> Self {
        AppError::Serialize(e.to_string())
    }
}
impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::Image(e.to_string())
    }
}
impl From<JoinError> for AppError {
    fn from(e: JoinError) -> Self {
        AppError::JoinError(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn http_status(status: reqwest::StatusCode, endpoint: &str, body: &str) -> AppError {
        AppError::HttpStatus {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            body: body.chars().take(150).collect(),
        }
    }

    pub fn api_rejected<S: Into<String>>(endpoint: &str, message: S) -> AppError {
        AppError::ApiRejected {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }
}
