//! Ordered request stages executed by a single dispatcher.
//!
//! A [`Stage`] looks at the incoming request and either lets it continue or
//! short-circuits with a finished response. [`PipelineLayer`] holds a fixed,
//! ordered list of stages; its service runs them one after another and only
//! forwards the request to the router once every stage has returned
//! [`Flow::Continue`].
//!
//! ```text
//! Request → stage[0] → stage[1] → ... → Router
//!              │           │
//!              ▼           ▼
//!         ShortCircuit(Response) returned immediately
//! ```

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response};
use tower::{Layer, Service};
use tracing::debug;

/// Outcome of a single stage.
pub enum Flow {
    /// Hand the request to the next stage (or the router).
    Continue,
    /// Stop processing and return this response.
    ShortCircuit(Response<Body>),
}

/// One step of the request pipeline.
pub trait Stage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Inspect the request and decide whether processing continues.
    fn inspect(&self, req: &Request<Body>) -> Flow;
}

/// Tower layer running a fixed list of stages in order.
#[derive(Clone)]
pub struct PipelineLayer {
    stages: Arc<[Arc<dyn Stage>]>,
}

impl PipelineLayer {
    pub fn new(stages: Vec<Arc<dyn Stage>>) -> Self {
        Self {
            stages: stages.into(),
        }
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl<S> Layer<S> for PipelineLayer {
    type Service = PipelineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PipelineService {
            inner,
            stages: self.stages.clone(),
        }
    }
}

/// Service wrapper produced by [`PipelineLayer`].
#[derive(Clone)]
pub struct PipelineService<S> {
    inner: S,
    stages: Arc<[Arc<dyn Stage>]>,
}

impl<S> Service<Request<Body>> for PipelineService<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        for stage in self.stages.iter() {
            if let Flow::ShortCircuit(response) = stage.inspect(&req) {
                debug!(
                    stage = stage.name(),
                    status = response.status().as_u16(),
                    "Pipeline short-circuited"
                );
                return Box::pin(async move { Ok(response) });
            }
        }

        // Take the service that was driven to readiness and leave a clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await })
    }
}
