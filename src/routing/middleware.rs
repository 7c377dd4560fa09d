//! Group-scoped middleware.
//!
//! A group's middleware wraps every route registered on that group after the
//! middleware was added. Child groups start with a copy of their parent's list.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::{from_fn, Next};
use axum::response::Response;
use axum::routing::MethodRouter;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

type BoxedMiddleware = Arc<dyn Fn(Request, Next) -> BoxFuture<'static, Response> + Send + Sync>;

/// A request middleware attached to a [`RouteGroup`](crate::routing::RouteGroup).
#[derive(Clone)]
pub struct Middleware {
    inner: BoxedMiddleware,
}

impl Middleware {
    /// Wrap an async function in the shape of `axum::middleware::from_fn`.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |req: Request, next: Next| f(req, next).boxed()),
        }
    }

    /// Layer this middleware around a single route.
    pub(crate) fn wrap<S>(&self, method_router: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let inner = self.inner.clone();
        method_router.layer(from_fn(move |req: Request, next: Next| (inner)(req, next)))
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware").finish_non_exhaustive()
    }
}
