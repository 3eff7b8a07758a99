use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

pub type Result<T> = std::result::Result<T, Error>;

pub const NOT_FOUND_BODY: &str = "Oops, page not found!";
pub const SERVER_ERROR_BODY: &str = "Oops, the server is broken!";
pub const CONFLICT_BODY: &str = "This record conflicts with an existing one.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn plain_text(status: StatusCode, body: impl Into<String>) -> axum::response::Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body.into(),
    )
        .into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        match &self {
            Error::NotFound(what) => {
                tracing::debug!(%what, "not found");
                plain_text(status, NOT_FOUND_BODY)
            }
            Error::BadRequest(msg) => plain_text(status, msg.clone()),
            Error::Multipart(err) => plain_text(status, err.to_string()),
            Error::Conflict(detail) => {
                tracing::warn!(%detail, "write rejected by a uniqueness constraint");
                plain_text(status, CONFLICT_BODY)
            }
            other => {
                tracing::error!(error = %other, "request failed");
                plain_text(status, SERVER_ERROR_BODY)
            }
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23505") => {
                Error::Conflict(db.message().to_string())
            }
            other => Error::Database(other),
        }
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Error::PasswordHash(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn conflicts_hide_the_constraint_detail() {
        let resp = Error::Conflict(
            "duplicate key value violates unique constraint \"companies_name_key\"".into(),
        )
        .into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], CONFLICT_BODY.as_bytes());
    }
}
