use crate::config::ConfigError;
use crate::crew::CrewError;
use crate::gallery::GalleryError;
use crate::selection::{MailError, SelectionError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Crew(CrewError),
    Gallery(GalleryError),
    Selection(SelectionError),
    Mail(MailError),
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    Render(BoxError),
    Background(BoxError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Crew(err) => write!(f, "crew roster error: {}", err),
            AppError::Gallery(err) => write!(f, "gallery error: {}", err),
            AppError::Selection(err) => write!(f, "selection error: {}", err),
            AppError::Mail(err) => write!(f, "mail error: {}", err),
            AppError::BadRequest(detail) => write!(f, "bad request: {}", detail),
            AppError::NotFound(detail) => write!(f, "not found: {}", detail),
            AppError::PayloadTooLarge(detail) => write!(f, "payload too large: {}", detail),
            AppError::Render(err) => write!(f, "template error: {}", err),
            AppError::Background(err) => write!(f, "background task error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Crew(err) => Some(err),
            AppError::Gallery(err) => Some(err),
            AppError::Selection(err) => Some(err),
            AppError::Mail(err) => Some(err),
            AppError::Render(err) | AppError::Background(err) => Some(&**err),
            AppError::BadRequest(_) | AppError::NotFound(_) | AppError::PayloadTooLarge(_) => {
                None
            }
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Gallery(GalleryError::InvalidFilename(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Crew(_)
            | AppError::Gallery(_)
            | AppError::Selection(_)
            | AppError::Mail(_)
            | AppError::Render(_)
            | AppError::Background(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CrewError> for AppError {
    fn from(value: CrewError) -> Self {
        Self::Crew(value)
    }
}

impl From<GalleryError> for AppError {
    fn from(value: GalleryError) -> Self {
        Self::Gallery(value)
    }
}

impl From<SelectionError> for AppError {
    fn from(value: SelectionError) -> Self {
        Self::Selection(value)
    }
}

impl From<MailError> for AppError {
    fn from(value: MailError) -> Self {
        Self::Mail(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_client_errors_to_4xx() {
        assert_eq!(
            AppError::NotFound("crew member 9".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(GalleryError::InvalidFilename("..".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::PayloadTooLarge("upload exceeds limit".to_string()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn roster_failures_are_server_errors() {
        let err = AppError::from(CrewError::Read {
            path: "members/crew.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("members/crew.json"));
    }
}
