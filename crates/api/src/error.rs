//! API error types with HTTP response mapping.

use std::any::Any;

use axum::extract::path::ErrorKind;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ItemIdError;
use serde::Serialize;

/// A single input validation failure, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Where the bad value came from, e.g. `["path", "item_id"]`.
    pub loc: Vec<String>,
    pub msg: String,
    pub input: String,
}

impl ValidationIssue {
    /// Builds an issue for an item ID taken from the request path.
    pub fn path_item_id(err: &ItemIdError) -> Self {
        Self {
            kind: err.code(),
            loc: vec!["path".to_string(), "item_id".to_string()],
            msg: err.to_string(),
            input: err.input().to_string(),
        }
    }
}

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed client input.
    Validation(Vec<ValidationIssue>),
    /// No route matched the request.
    NotFound,
    /// The path matched but not with this method.
    MethodNotAllowed,
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(issues) => {
                tracing::debug!(?issues, "request failed validation");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    serde_json::json!({ "detail": issues }),
                )
            }
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "detail": "Not Found" }),
            ),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                serde_json::json!({ "detail": "Method Not Allowed" }),
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "detail": "Internal Server Error" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ItemIdError> for ApiError {
    fn from(err: ItemIdError) -> Self {
        ApiError::Validation(vec![ValidationIssue::path_item_id(&err)])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let mut loc = vec!["path".to_string()];
        if let PathRejection::FailedToDeserializePathParams(err) = &rejection {
            match err.kind() {
                ErrorKind::InvalidUtf8InPathParam { key }
                | ErrorKind::ParseErrorAtKey { key, .. } => loc.push(key.clone()),
                _ => {}
            }
        }
        ApiError::Validation(vec![ValidationIssue {
            kind: "path_parsing",
            loc,
            msg: rejection.body_text(),
            input: String::new(),
        }])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![ValidationIssue {
            kind: "query_parsing",
            loc: vec!["query".to_string()],
            msg: rejection.body_text(),
            input: String::new(),
        }])
    }
}

/// Turns a handler panic into a 500 response, for `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let msg = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(msg).into_response()
}

#[cfg(test)]
mod tests {
    use common::ItemId;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn validation_error_maps_to_422_with_detail() {
        let err: ApiError = ItemId::parse("abc").unwrap_err().into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({
                "detail": [{
                    "type": "int_parsing",
                    "loc": ["path", "item_id"],
                    "msg": "Input should be a valid integer, unable to parse string as an integer",
                    "input": "abc"
                }]
            })
        );
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "detail": "Not Found" })
        );
    }

    #[tokio::test]
    async fn method_not_allowed_maps_to_405() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "detail": "Method Not Allowed" })
        );
    }

    #[tokio::test]
    async fn panic_payload_becomes_500() {
        let response = handle_panic(Box::new("index out of bounds"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn internal_error_hides_message() {
        let response = ApiError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "detail": "Internal Server Error" })
        );
    }
}
