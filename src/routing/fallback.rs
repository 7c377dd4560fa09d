//! Group-scoped "no route" handling.
//!
//! # Data Flow
//! ```text
//! register_group_fallback / set_default_fallback
//!     → FallbackRegistry (group prefix → handlers, default handlers)
//!     → compose() (scope each group handler to its prefix, append default)
//!     → FallbackChain installed wholesale on the axum Router
//!
//! Unmatched request:
//!     → FallbackChain::dispatch
//!     → first handler returning Some(response) wins
//!     → empty 404 if every handler yields
//! ```
//!
//! # Design Decisions
//! - axum only holds one flat fallback, so group scoping is simulated by
//!   prefix guards inside a single ordered chain
//! - The guard lower-cases the request path but not the group prefix
//! - Overlapping prefixes (`/admin` and `/admin/sub`) are not detected; the
//!   group registered first is earlier in the chain and wins

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

/// The parts of an unmatched request a fallback handler gets to see.
#[derive(Debug, Clone)]
pub struct FallbackRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl FallbackRequest {
    pub fn path(&self) -> &str {
        self.uri.path()
    }
}

impl From<Request> for FallbackRequest {
    fn from(req: Request) -> Self {
        let (parts, _body) = req.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
        }
    }
}

type BoxedFallback =
    Arc<dyn Fn(FallbackRequest) -> BoxFuture<'static, Option<Response>> + Send + Sync>;

/// One link of the fallback chain.
///
/// Returning `Some(response)` answers the request and stops the chain.
/// Returning `None` hands the request to the next handler.
#[derive(Clone)]
pub struct FallbackHandler {
    inner: BoxedFallback,
    scope: Option<String>,
}

impl FallbackHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(FallbackRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Response>> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |req: FallbackRequest| f(req).boxed()),
            scope: None,
        }
    }

    /// A handler that always answers.
    pub fn respond<F, R>(f: F) -> Self
    where
        F: Fn(&FallbackRequest) -> R + Send + Sync + 'static,
        R: IntoResponse,
    {
        Self::new(move |req: FallbackRequest| {
            let response = f(&req).into_response();
            async move { Some(response) }
        })
    }

    /// Restrict this handler to requests whose lower-cased path starts with `prefix`.
    ///
    /// `prefix` itself is compared as given, so a mixed-case group path never
    /// matches.
    pub fn scoped_to(&self, prefix: &str) -> Self {
        let inner = self.inner.clone();
        let guard = prefix.to_string();
        Self {
            inner: Arc::new(move |req: FallbackRequest| {
                if req.path().to_lowercase().starts_with(&guard) {
                    (inner)(req)
                } else {
                    async { None }.boxed()
                }
            }),
            scope: Some(prefix.to_string()),
        }
    }

    /// The group prefix this handler is scoped to, if any.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub async fn call(&self, req: FallbackRequest) -> Option<Response> {
        (self.inner)(req).await
    }
}

impl fmt::Debug for FallbackHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackHandler")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Group fallbacks in registration order, plus the unscoped default.
#[derive(Debug, Default)]
pub(crate) struct FallbackRegistry {
    groups: Vec<(String, Vec<FallbackHandler>)>,
    default: Vec<FallbackHandler>,
}

impl FallbackRegistry {
    /// Store handlers for a group. A group registering again keeps its
    /// first position in the chain.
    pub(crate) fn set_group(&mut self, base_path: &str, handlers: Vec<FallbackHandler>) {
        match self.groups.iter_mut().find(|(path, _)| path == base_path) {
            Some((_, existing)) => *existing = handlers,
            None => self.groups.push((base_path.to_string(), handlers)),
        }
    }

    /// Replace the default handlers unless `handlers` is empty.
    pub(crate) fn set_default(&mut self, handlers: Vec<FallbackHandler>) {
        if !handlers.is_empty() {
            self.default = handlers;
        }
    }

    pub(crate) fn compose(&self) -> Vec<FallbackHandler> {
        compose(&self.groups, &self.default)
    }
}

/// Flatten group fallbacks and the default fallback into one ordered chain.
///
/// Every group handler is scoped to its group's base path. Default handlers
/// follow unscoped.
pub fn compose(
    group_fallbacks: &[(String, Vec<FallbackHandler>)],
    default_fallback: &[FallbackHandler],
) -> Vec<FallbackHandler> {
    let scoped: usize = group_fallbacks.iter().map(|(_, h)| h.len()).sum();
    let mut chain = Vec::with_capacity(scoped + default_fallback.len());

    for (base_path, handlers) in group_fallbacks {
        chain.extend(handlers.iter().map(|h| h.scoped_to(base_path)));
    }
    chain.extend(default_fallback.iter().cloned());
    chain
}

/// The composed chain as installed on the router.
#[derive(Debug, Clone)]
pub struct FallbackChain {
    handlers: Arc<[FallbackHandler]>,
}

impl FallbackChain {
    pub fn new(handlers: Vec<FallbackHandler>) -> Self {
        Self {
            handlers: handlers.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the chain for one unmatched request.
    pub async fn dispatch(self, req: Request) -> Response {
        let req = FallbackRequest::from(req);

        for (position, handler) in self.handlers.iter().enumerate() {
            if let Some(response) = handler.call(req.clone()).await {
                tracing::trace!(
                    path = %req.path(),
                    position,
                    scope = ?handler.scope(),
                    "Fallback handler responded"
                );
                return response;
            }
        }

        tracing::trace!(path = %req.path(), "No fallback handler responded");
        StatusCode::NOT_FOUND.into_response()
    }
}
