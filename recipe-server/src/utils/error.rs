//! Error plumbing between the repository layer and HTTP responses
//!
//! The error types themselves live in `shared::error`; this module adds
//! the conversions and the extractors the handlers use.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query, Request};
use http::request::Parts;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Business(code, msg) => AppError::with_message(code, msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::database(msg)
            }
        }
    }
}

/// `Json<T>` whose rejection is an [`AppError`] (400 `ValidationFailed`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `Query<T>` whose rejection is an [`AppError`] (400 `ValidationFailed`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `Path<T>` for record ids
///
/// A segment that does not parse (`abc`, an id past `i64::MAX`) cannot name
/// a record, so it answers 404 `NotFound` like any other missing record.
#[derive(Debug, Clone, Copy)]
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection(rejection)),
        }
    }
}

fn path_rejection(rejection: PathRejection) -> AppError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => {
            AppError::new(ErrorCode::NotFound).with_detail("path", e.body_text())
        }
        other => AppError::internal(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_repo_not_found_maps_to_404() {
        let err: AppError = RepoError::NotFound("Recipe 3 not found".into()).into();
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Recipe 3 not found");
    }

    #[test]
    fn test_repo_duplicate_maps_to_409() {
        let err: AppError = RepoError::Duplicate("users.email".into()).into();
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_repo_database_maps_to_500() {
        let err: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_repo_business_keeps_code() {
        let err: AppError =
            RepoError::Business(ErrorCode::EmailAlreadyExists, "taken".into()).into();
        assert_eq!(err.code, ErrorCode::EmailAlreadyExists);
    }

    #[tokio::test]
    async fn test_unparseable_id_is_not_found() {
        use axum::{Router, body::Body, routing::get};
        use tower::ServiceExt;

        async fn show(AppPath(id): AppPath<i64>) -> String {
            id.to_string()
        }
        let app = Router::new().route("/items/{id}/", get(show));

        for uri in ["/items/abc/", "/items/99999999999999999999/", "/items/1.5/"] {
            let request = http::Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }

        let request = http::Request::builder().uri("/items/42/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
