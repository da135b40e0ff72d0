use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use garden_db::models::InvalidIdError;

use super::forms::FormError;
use super::views;

/// Every way a request handler can fail, rendered as an HTML page.
#[derive(Debug, Error)]
pub enum AppError {
    /// A `{plant_id}` path segment that cannot name any plant.
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),
    #[error("{0} not found")]
    NotFound(String),
    #[error(transparent)]
    Validation(#[from] FormError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = match &self {
            Self::InvalidId(err) => {
                tracing::debug!(%err, "rejecting malformed plant id");
                views::not_found()
            }
            Self::NotFound(what) => {
                tracing::debug!(what = %what, "resource not found");
                views::not_found()
            }
            Self::Validation(err) => views::error_page("Invalid Form", &err.to_string()),
            Self::Internal(err) => {
                tracing::error!(error = %format!("{err:#}"), "request failed");
                views::error_page(
                    "Something Went Wrong",
                    "The server could not complete your request.",
                )
            }
        };
        (status, Html(page)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        let invalid: AppError = "nope".parse::<garden_db::models::PlantId>().unwrap_err().into();
        assert_eq!(invalid.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::not_found("plant x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(FormError("plant_name")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_error_hides_cause() {
        let resp = AppError::from(anyhow::anyhow!("password=hunter2")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(resp.into_body(), 1_048_576)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Something Went Wrong"));
        assert!(!html.contains("hunter2"));
    }
}
