//! The root of the group tree.
//!
//! # Responsibilities
//! - Own the wrapped axum `Router` every group mounts routes on
//! - Own the global registry of created groups, keyed by absolute path
//! - Own the fallback registry and reinstall the composed chain on change
//!
//! # Design Decisions
//! - No process globals: every `RouteGroup` holds a handle to its engine
//! - Groups live as long as the engine and are never removed
//! - Registration is expected to finish before serving starts; `router()`
//!   hands out a snapshot

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::Request;
use axum::routing::MethodRouter;
use axum::Router;
use dashmap::DashMap;

use crate::routing::fallback::{FallbackChain, FallbackHandler, FallbackRegistry};
use crate::routing::group::{GroupCore, RouteGroup};
use crate::routing::middleware::Middleware;

/// Base path of the root group.
pub const ROOT_PATH: &str = "/";

struct RouterSlot<S> {
    router: Router<S>,
    chain: Option<FallbackChain>,
}

struct EngineShared<S> {
    slot: Mutex<RouterSlot<S>>,
    root: Arc<GroupCore>,
    groups_created: DashMap<String, Arc<GroupCore>>,
    fallbacks: Mutex<FallbackRegistry>,
}

/// Route registration front-end over an axum [`Router`].
pub struct Engine<S = ()> {
    shared: Arc<EngineShared<S>>,
}

impl<S> Clone for Engine<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S> fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("groups", &self.shared.groups_created.len())
            .finish_non_exhaustive()
    }
}

impl Engine<()> {
    /// Create an engine around a fresh `Router`.
    pub fn new() -> Self {
        Self::with_router(Router::new())
    }
}

impl Default for Engine<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Engine<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create an engine around an existing `Router`.
    ///
    /// Routes already on `router` are served but carry no settings.
    pub fn with_router(router: Router<S>) -> Self {
        let root = Arc::new(GroupCore::new(ROOT_PATH, Vec::new()));
        let groups_created = DashMap::new();
        groups_created.insert(ROOT_PATH.to_string(), root.clone());

        Self {
            shared: Arc::new(EngineShared {
                slot: Mutex::new(RouterSlot {
                    router,
                    chain: None,
                }),
                root,
                groups_created,
                fallbacks: Mutex::new(FallbackRegistry::default()),
            }),
        }
    }

    pub fn root_group(&self) -> RouteGroup<S> {
        RouteGroup::new(self.clone(), self.shared.root.clone())
    }

    /// Create or fetch a group relative to the root.
    pub fn group(&self, relative_path: &str) -> RouteGroup<S> {
        self.group_with(relative_path, Vec::new())
    }

    pub fn group_with(&self, relative_path: &str, middleware: Vec<Middleware>) -> RouteGroup<S> {
        if relative_path.is_empty() || relative_path == ROOT_PATH {
            return self.root_group();
        }
        self.root_group().group_with(relative_path, middleware)
    }

    /// Every group created so far, root included, sorted by base path.
    pub fn groups(&self) -> Vec<RouteGroup<S>> {
        let mut groups: Vec<RouteGroup<S>> = self
            .shared
            .groups_created
            .iter()
            .map(|entry| RouteGroup::new(self.clone(), entry.value().clone()))
            .collect();
        groups.sort_by(|a, b| a.base_path().cmp(b.base_path()));
        groups
    }

    /// Replace the unscoped fallback handlers and reinstall the whole chain.
    ///
    /// An empty `handlers` keeps the previously set default, so calling this
    /// with nothing before any default exists installs group fallbacks only.
    pub fn set_default_fallback(&self, handlers: Vec<FallbackHandler>) {
        let chain = {
            let mut registry = self.lock_fallbacks();
            registry.set_default(handlers);
            registry.compose()
        };
        self.install_fallback(FallbackChain::new(chain));
    }

    /// Recompose and reinstall the fallback chain with the current handlers.
    pub fn reinstall_fallback(&self) {
        self.set_default_fallback(Vec::new());
    }

    /// The router with every route and the current fallback chain.
    ///
    /// The chain also answers requests whose path matched but whose method
    /// did not.
    pub fn router(&self) -> Router<S> {
        let slot = self.lock_slot();
        match slot.chain.clone() {
            Some(chain) => slot
                .router
                .clone()
                .method_not_allowed_fallback(move |req: Request| chain.dispatch(req)),
            None => slot.router.clone(),
        }
    }

    pub(crate) fn group_at<F>(&self, full_path: &str, middleware: F) -> RouteGroup<S>
    where
        F: FnOnce() -> Vec<Middleware>,
    {
        if full_path == ROOT_PATH {
            return self.root_group();
        }

        let core = self
            .shared
            .groups_created
            .entry(full_path.to_string())
            .or_insert_with(|| {
                tracing::debug!(path = %full_path, "Route group created");
                Arc::new(GroupCore::new(full_path, middleware()))
            })
            .value()
            .clone();
        RouteGroup::new(self.clone(), core)
    }

    pub(crate) fn mount(&self, path: &str, method_router: MethodRouter<S>) {
        let mut slot = self.lock_slot();
        // A duplicate-route panic must leave the previous router in place.
        slot.router = slot.router.clone().route(path, method_router);
    }

    pub(crate) fn register_group_fallback(&self, base_path: &str, handlers: Vec<FallbackHandler>) {
        tracing::debug!(group = %base_path, handlers = handlers.len(), "Group fallback registered");
        self.lock_fallbacks().set_group(base_path, handlers);
        self.reinstall_fallback();
    }

    fn install_fallback(&self, chain: FallbackChain) {
        tracing::debug!(handlers = chain.len(), "Installing fallback chain");

        let mut slot = self.lock_slot();
        let installed = chain.clone();
        slot.router = slot
            .router
            .clone()
            .fallback(move |req: Request| installed.dispatch(req));
        slot.chain = Some(chain);
    }

    fn lock_slot(&self) -> MutexGuard<'_, RouterSlot<S>> {
        // The slot is only ever replaced whole, so a poisoned guard still
        // holds a consistent router.
        self.shared
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_fallbacks(&self) -> MutexGuard<'_, FallbackRegistry> {
        self.shared
            .fallbacks
            .lock()
            .expect("fallback registry mutex poisoned")
    }
}
