//! Route groups and their metadata index.
//!
//! # Responsibilities
//! - Spawn or fetch child groups by absolute path
//! - Mount routes on the engine's axum router, wrapped in group middleware
//! - Record a `RouteSetting` per registration, keyed by `route_key`
//! - Answer metadata lookups for the current request or a given path
//!
//! # Design Decisions
//! - A group only indexes routes registered directly on it, not descendants
//! - Group identity is the absolute base path; handles are cheap clones
//! - `set` targets the most recent registration on the same group only

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::extract::MatchedPath;
use axum::handler::Handler;
use axum::http::{Method, Request};
use axum::routing::on;

use crate::error::RouteExtError;
use crate::routing::engine::Engine;
use crate::routing::fallback::FallbackHandler;
use crate::routing::method::HttpMethod;
use crate::routing::middleware::Middleware;
use crate::routing::path::{join_paths, route_key};
use crate::routing::setting::RouteSetting;

/// Shared state behind every handle to one group.
#[derive(Debug)]
pub(crate) struct GroupCore {
    base_path: String,
    state: RwLock<GroupState>,
}

#[derive(Debug, Default)]
struct GroupState {
    routes: HashMap<String, RouteSetting>,
    /// Index key of the latest registration.
    last_registered: Option<String>,
    middleware: Vec<Middleware>,
}

impl GroupCore {
    pub(crate) fn new(base_path: impl Into<String>, middleware: Vec<Middleware>) -> Self {
        Self {
            base_path: base_path.into(),
            state: RwLock::new(GroupState {
                middleware,
                ..GroupState::default()
            }),
        }
    }

    pub(crate) fn base_path(&self) -> &str {
        &self.base_path
    }

    pub(crate) fn middleware(&self) -> Vec<Middleware> {
        self.read().middleware.clone()
    }

    fn read(&self) -> RwLockReadGuard<'_, GroupState> {
        self.state.read().expect("route group lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, GroupState> {
        self.state.write().expect("route group lock poisoned")
    }
}

/// A path-prefixed scope for registering routes, settings and fallbacks.
pub struct RouteGroup<S = ()> {
    engine: Engine<S>,
    core: Arc<GroupCore>,
}

impl<S> Clone for RouteGroup<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            core: self.core.clone(),
        }
    }
}

impl<S> fmt::Debug for RouteGroup<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGroup")
            .field("base_path", &self.core.base_path)
            .finish_non_exhaustive()
    }
}

impl<S> RouteGroup<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(engine: Engine<S>, core: Arc<GroupCore>) -> Self {
        Self { engine, core }
    }

    pub fn base_path(&self) -> &str {
        self.core.base_path()
    }

    pub fn root_group(&self) -> RouteGroup<S> {
        self.engine.root_group()
    }

    /// Create a child group, or return the one already registered at the same
    /// absolute path.
    pub fn group(&self, relative_path: &str) -> RouteGroup<S> {
        self.group_with(relative_path, Vec::new())
    }

    /// Like [`group`](Self::group), with extra middleware for a newly created
    /// group. The new group runs this group's middleware first.
    ///
    /// `middleware` is dropped when the group already exists.
    pub fn group_with(&self, relative_path: &str, middleware: Vec<Middleware>) -> RouteGroup<S> {
        let full_path = join_paths(self.base_path(), relative_path);
        self.engine.group_at(&full_path, || {
            let mut inherited = self.core.middleware();
            inherited.extend(middleware);
            inherited
        })
    }

    /// Add middleware for routes and child groups created from now on.
    pub fn use_middleware(&self, middleware: Middleware) -> &Self {
        self.core.write().middleware.push(middleware);
        self
    }

    /// Register a route and record its settings entry.
    ///
    /// # Panics
    /// When the router already has a handler for this method and path.
    pub fn handle<H, T>(&self, method: HttpMethod, relative_path: &str, handler: H) -> &Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let full_path = join_paths(self.base_path(), relative_path);

        let mut method_router = on(method.filter(), handler);
        for middleware in self.core.middleware().iter().rev() {
            method_router = middleware.wrap(method_router);
        }
        self.engine.mount(&full_path, method_router);

        let key = route_key(method.as_str(), self.base_path(), relative_path);
        let mut state = self.core.write();
        let order = state.routes.len() + 1;
        state.routes.insert(
            key.clone(),
            RouteSetting::new(order, method, relative_path, full_path.as_str()),
        );
        state.last_registered = Some(key);
        drop(state);

        tracing::debug!(
            method = %method,
            path = %full_path,
            group = %self.base_path(),
            order,
            "Route registered"
        );
        self
    }

    /// String-method form of [`handle`](Self::handle).
    pub fn try_handle<H, T>(
        &self,
        method: &str,
        relative_path: &str,
        handler: H,
    ) -> Result<&Self, RouteExtError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let method: HttpMethod = method.parse()?;
        Ok(self.handle(method, relative_path, handler))
    }

    pub fn get<H, T>(&self, relative_path: &str, handler: H) -> &Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handle(HttpMethod::Get, relative_path, handler)
    }

    pub fn post<H, T>(&self, relative_path: &str, handler: H) -> &Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handle(HttpMethod::Post, relative_path, handler)
    }

    pub fn put<H, T>(&self, relative_path: &str, handler: H) -> &Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handle(HttpMethod::Put, relative_path, handler)
    }

    pub fn delete<H, T>(&self, relative_path: &str, handler: H) -> &Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handle(HttpMethod::Delete, relative_path, handler)
    }

    pub fn head<H, T>(&self, relative_path: &str, handler: H) -> &Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handle(HttpMethod::Head, relative_path, handler)
    }

    pub fn patch<H, T>(&self, relative_path: &str, handler: H) -> &Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handle(HttpMethod::Patch, relative_path, handler)
    }

    pub fn options<H, T>(&self, relative_path: &str, handler: H) -> &Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        self.handle(HttpMethod::Options, relative_path, handler)
    }

    /// Assign settings to the route registered last on this group.
    ///
    /// Does nothing if no route has been registered here yet.
    pub fn set(
        &self,
        name: impl Into<String>,
        requires_auth: bool,
        requires_acl: bool,
        extra: HashMap<String, String>,
    ) -> &Self {
        let mut state = self.core.write();
        let GroupState {
            routes,
            last_registered,
            ..
        } = &mut *state;

        if let Some(setting) = last_registered.as_ref().and_then(|key| routes.get_mut(key)) {
            setting.name = name.into();
            setting.requires_auth = requires_auth;
            setting.requires_acl = requires_acl;
            setting.extra = extra;
        }
        self
    }

    /// Settings for the route the router matched for `req`.
    ///
    /// `None` when the request matched no route or the route belongs to
    /// another group. axum answers HEAD with a GET route, so a HEAD request
    /// with no HEAD route of its own gets the GET route's settings.
    pub fn lookup_current<B>(&self, req: &Request<B>) -> Option<RouteSetting> {
        let matched = req.extensions().get::<MatchedPath>()?;
        let setting = self.lookup_by_path(req.method().as_str(), matched.as_str());
        if setting.is_none() && *req.method() == Method::HEAD {
            return self.lookup_by_path(Method::GET.as_str(), matched.as_str());
        }
        setting
    }

    /// Settings for a method and a fully resolved route template.
    pub fn lookup_by_path(&self, method: &str, path: &str) -> Option<RouteSetting> {
        let key = route_key(method, "", path);
        self.core.read().routes.get(&key).cloned()
    }

    /// Every route registered directly on this group, by index key.
    pub fn routes_map(&self) -> HashMap<String, RouteSetting> {
        self.core.read().routes.clone()
    }

    /// The routes of this group that require an access-control check.
    pub fn acl_items(&self) -> HashMap<String, RouteSetting> {
        self.core
            .read()
            .routes
            .iter()
            .filter(|(_, setting)| setting.requires_acl)
            .map(|(key, setting)| (key.clone(), setting.clone()))
            .collect()
    }

    /// Install "no route" handlers for requests under this group's path.
    pub fn register_group_fallback(&self, handlers: Vec<FallbackHandler>) {
        self.engine
            .register_group_fallback(self.base_path(), handlers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::setting::extra;

    async fn ok() -> &'static str {
        "ok"
    }

    #[test]
    fn test_group_is_idempotent() {
        let engine = Engine::new();
        let first = engine.group("/admin");
        let second = engine.root_group().group("admin/");

        assert_eq!(first.base_path(), "/admin");
        assert_eq!(second.base_path(), "/admin/");

        let again = engine.group("/admin");
        again.get("/hello", ok);
        assert!(first.lookup_by_path("GET", "/admin/hello").is_some());
        assert!(second.routes_map().is_empty());
    }

    #[test]
    fn test_nested_group_from_any_ancestor() {
        let engine = Engine::new();
        let via_parent = engine.group("/admin").group("/sub");
        let via_root = engine.group("/admin/sub");
        via_root.get("/x", ok);

        assert_eq!(via_parent.base_path(), "/admin/sub");
        assert!(via_parent.lookup_by_path("GET", "/admin/sub/x").is_some());
    }

    #[test]
    fn test_empty_or_root_path_returns_root() {
        let engine = Engine::new();
        assert_eq!(engine.group("").base_path(), "/");
        assert_eq!(engine.group("/").base_path(), "/");

        let admin = engine.group("/admin");
        assert_eq!(admin.group("").base_path(), "/admin");
        assert_eq!(admin.group("..").base_path(), "/");

        engine.group("/").get("/hello", ok);
        assert!(engine.root_group().lookup_by_path("GET", "/hello").is_some());
    }

    #[test]
    fn test_order_follows_registration() {
        let engine = Engine::new();
        let admin = engine.group("/admin");
        admin
            .get("/a", ok)
            .post("/b", ok)
            .delete("/a", ok)
            .put("/c/{id}", ok)
            .options("/d/", ok);

        let mut orders: Vec<(usize, String)> = admin
            .routes_map()
            .into_values()
            .map(|s| (s.order, format!("{} {}", s.method, s.path)))
            .collect();
        orders.sort();
        assert_eq!(
            orders,
            vec![
                (1, "GET /a".to_string()),
                (2, "POST /b".to_string()),
                (3, "DELETE /a".to_string()),
                (4, "PUT /c/{id}".to_string()),
                (5, "OPTIONS /d/".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_and_delete_on_same_path_are_distinct() {
        let engine = Engine::new();
        let admin = engine.group("/admin");
        admin.get("/item", ok).set("read", false, false, HashMap::new());
        admin.delete("/item", ok).set("remove", true, true, HashMap::new());

        let read = admin.lookup_by_path("GET", "/admin/item").unwrap();
        let remove = admin.lookup_by_path("DELETE", "/admin/item").unwrap();
        assert_eq!(read.name, "read");
        assert_eq!(remove.name, "remove");
        assert_eq!(remove.full_path, "/admin/item");
    }

    #[test]
    fn test_set_targets_last_registered_route() {
        let engine = Engine::new();
        let admin = engine.group("/admin");
        admin
            .get("/article/list", ok)
            .set(
                "Article list",
                true,
                true,
                extra([("showInSitemap", "1"), ("name_en", "Article List")]),
            );
        admin.get("/hello", ok);

        let list = admin.lookup_by_path("GET", "/admin/article/list").unwrap();
        assert_eq!(list.name, "Article list");
        assert!(list.requires_auth && list.requires_acl);
        assert_eq!(list.extra("name_en"), Some("Article List"));

        let hello = admin.lookup_by_path("GET", "/admin/hello").unwrap();
        assert!(hello.name.is_empty());
        assert!(!hello.requires_auth);
    }

    #[test]
    fn test_set_before_registration_is_noop() {
        let engine = Engine::new();
        let fresh = engine.group("/fresh");
        fresh.set("nothing", true, true, extra([("k", "v")]));
        assert!(fresh.routes_map().is_empty());
    }

    #[test]
    fn test_set_does_not_reach_other_groups() {
        let engine = Engine::new();
        let admin = engine.group("/admin");
        let web = engine.group("/web");
        admin.get("/hello", ok);
        web.set("web", true, false, HashMap::new());

        assert!(admin.lookup_by_path("GET", "/admin/hello").unwrap().name.is_empty());
    }

    #[test]
    fn test_acl_items_filters_requires_acl() {
        let engine = Engine::new();
        let admin = engine.group("/admin");
        admin.get("/one", ok).set("one", true, true, HashMap::new());
        admin.get("/two", ok).set("two", true, false, HashMap::new());
        admin.put("/three/{id}", ok).set("three", true, true, HashMap::new());

        let items = admin.acl_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items["GET /admin/one"].name, "one");
        assert_eq!(items["PUT /admin/three/{id}"].name, "three");
        assert!(!items.contains_key("GET /admin/two"));
    }

    #[test]
    fn test_lookup_is_scoped_to_owning_group() {
        let engine = Engine::new();
        let admin = engine.group("/admin");
        let sub = admin.group("/sub");
        sub.get("/x", ok);

        assert!(sub.lookup_by_path("GET", "/admin/sub/x").is_some());
        assert!(admin.lookup_by_path("GET", "/admin/sub/x").is_none());
        assert!(sub.lookup_by_path("POST", "/admin/sub/x").is_none());
    }

    #[test]
    fn test_try_handle_rejects_unsupported_method() {
        let engine = Engine::new();
        let admin = engine.group("/admin");

        let err = admin.try_handle("TRACE", "/x", ok).unwrap_err();
        assert_eq!(err, RouteExtError::UnsupportedMethod("TRACE".into()));
        assert!(admin.routes_map().is_empty());

        assert!(admin.try_handle("PATCH", "/x", ok).is_ok());
        assert_eq!(
            admin.lookup_by_path("PATCH", "/admin/x").map(|s| s.method),
            Some(HttpMethod::Patch)
        );
    }
}
