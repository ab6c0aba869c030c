//! Application error type mapping to HTTP status codes and an error page.

use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tera::Tera;

use coffeechat_types::error::{ChatError, FormError};

/// The error page, compiled once. Rendered without access to `AppState`.
static ERROR_PAGE: LazyLock<Option<Tera>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    match tera.add_raw_template("error.html", include_str!("../../templates/error.html")) {
        Ok(()) => Some(tera),
        Err(e) => {
            tracing::error!(error = ?e, "error page template failed to compile");
            None
        }
    }
});

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat operation failed (validation or backend).
    Chat(ChatError),
    /// A second submit raced an in-flight one.
    Conflict(String),
    /// Page rendering failed.
    Template(tera::Error),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<FormError> for AppError {
    fn from(e: FormError) -> Self {
        match e {
            FormError::Chat(e) => AppError::Chat(e),
            FormError::AlreadySubmitting | FormError::AlreadySubmitted => {
                AppError::Conflict(e.to_string())
            }
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(e: tera::Error) -> Self {
        AppError::Template(e)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Chat(ChatError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Chat(ChatError::Remote(e)) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Chat(ChatError::Remote(_)) => StatusCode::BAD_GATEWAY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Chat(ChatError::Remote(e)) if e.is_not_found() => {
                "That chat does not exist.".to_string()
            }
            AppError::Chat(e) => e.to_string(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Template(_) => "The page could not be rendered.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Template(e) => tracing::error!(error = ?e, "template rendering failed"),
            other => tracing::warn!(status = status.as_u16(), error = ?other, "request failed"),
        }

        let mut ctx = tera::Context::new();
        ctx.insert("status_code", &status.as_u16());
        ctx.insert("status_text", status.canonical_reason().unwrap_or(""));
        ctx.insert("message", &self.message());

        let page = ERROR_PAGE
            .as_ref()
            .and_then(|tera| tera.render("error.html", &ctx).ok());
        match page {
            Some(body) => (status, Html(body)).into_response(),
            None => (status, self.message()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use coffeechat_types::chat::ChatField;
    use coffeechat_types::error::{RemoteError, ValidationError};

    use super::*;

    fn remote(status: u16) -> AppError {
        AppError::Chat(ChatError::Remote(RemoteError::Status {
            method: "GET".to_string(),
            url: "http://localhost:8000/api/chats/1".to_string(),
            status,
        }))
    }

    #[test]
    fn status_mapping() {
        assert_eq!(remote(404).status(), StatusCode::NOT_FOUND);
        assert_eq!(remote(500).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            AppError::Chat(ChatError::Remote(RemoteError::Transport("refused".into()))).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Chat(ValidationError::MissingField(ChatField::Notes).into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(FormError::AlreadySubmitting).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(FormError::AlreadySubmitted).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn error_page_compiles() {
        assert!(ERROR_PAGE.is_some());
    }

    #[tokio::test]
    async fn renders_html_error_page() {
        let response = remote(503).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("502 Bad Gateway"));
        assert!(html.contains("returned HTTP 503"));
    }
}
