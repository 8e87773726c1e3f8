//! Request extractors that run validation before a handler is entered.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::error::AppError;
use crate::models::ProductInput;
use crate::validation::validate_product;

/// A JSON request body that passed product validation.
///
/// Malformed JSON, a non-JSON content type, and failed field checks all
/// reject with `ValidationError` (400); a body over the size limit rejects
/// with `PayloadTooLargeError` (413).
#[derive(Debug)]
pub struct ValidatedProduct(pub ProductInput);

impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Value>::from_request(req, state).await?;
        validate_product(&payload).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use axum::body::Body;
    use axum::http;
    use axum::http::header::CONTENT_TYPE;

    use super::*;

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = json_request(
            r#"{"name":"Phone","description":"d","price":500,"category":"electronics","inStock":true}"#,
        );
        let ValidatedProduct(input) = ValidatedProduct::from_request(req, &()).await.unwrap();
        assert_eq!(input.category, "electronics");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let err = ValidatedProduct::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_validation_error() {
        let req = http::Request::builder()
            .method("POST")
            .body(Body::from("{}"))
            .unwrap();
        let err = ValidatedProduct::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }
}
