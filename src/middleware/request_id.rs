//! Request ID middleware.
//!
//! - Propagates a non-empty incoming `X-Request-Id` header
//! - Otherwise generates a UUIDv4
//! - Stores the id as a [`RequestId`] request extension for later stages
//! - Echoes the id on the response
//!
//! This layer sits outside the stage pipeline so that even short-circuited
//! responses (e.g. `401`) carry the header.

use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::header::HeaderValue;
use axum::http::{Request, Response};
use tower::{Layer, Service};
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied id that is propagated as-is.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Request id stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Request ID layer for Tower middleware stack.
#[derive(Clone, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Request ID service wrapper.
#[derive(Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let (request_id, header) = extract_or_generate_request_id(&req);
        req.extensions_mut().insert(request_id);

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            response.headers_mut().insert(REQUEST_ID_HEADER, header);
            Ok(response)
        })
    }
}

/// Reuse the caller's id when it is a sane header value, else mint one.
fn extract_or_generate_request_id<B>(req: &Request<B>) -> (RequestId, HeaderValue) {
    if let Some(header_value) = req.headers().get(REQUEST_ID_HEADER)
        && let Ok(value) = header_value.to_str()
        && !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
    {
        return (RequestId(value.to_string()), header_value.clone());
    }

    let id = Uuid::new_v4().to_string();
    // A hyphenated UUID is always a valid header value.
    let header = HeaderValue::from_str(&id).unwrap_or(HeaderValue::from_static("unknown"));
    (RequestId(id), header)
}

/// Extension trait to read the request id assigned by [`RequestIdLayer`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions().get::<RequestId>().map(RequestId::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::convert::Infallible;

    use tower::{ServiceExt, service_fn};

    use super::*;

    #[test]
    fn test_extract_existing_request_id() {
        let req = Request::builder()
            .header("x-request-id", "existing-id-123")
            .body(Body::empty())
            .unwrap();

        let (id, header) = extract_or_generate_request_id(&req);
        assert_eq!(id.as_str(), "existing-id-123");
        assert_eq!(header, "existing-id-123");
    }

    #[test]
    fn test_generate_new_request_id() {
        let req = Request::builder().body(Body::empty()).unwrap();
        let (id, _) = extract_or_generate_request_id(&req);
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_overlong_request_id_replaced() {
        let req = Request::builder()
            .header("x-request-id", "a".repeat(MAX_REQUEST_ID_LEN + 1))
            .body(Body::empty())
            .unwrap();
        let (id, _) = extract_or_generate_request_id(&req);
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[tokio::test]
    async fn test_layer_sets_extension_and_response_header() {
        let service = RequestIdLayer::new().layer(service_fn(|req: Request<Body>| async move {
            let seen = req.request_id().unwrap_or_default().to_string();
            Ok::<_, Infallible>(Response::new(Body::from(seen)))
        }));

        let req = Request::builder()
            .header("x-request-id", "corr-1")
            .body(Body::empty())
            .unwrap();
        let response = service.oneshot(req).await.unwrap();

        assert_eq!(response.headers()[REQUEST_ID_HEADER], "corr-1");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"corr-1");
    }
}
