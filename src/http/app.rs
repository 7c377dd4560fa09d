//! Example application wiring.
//!
//! Two groups with route settings and their own fallbacks, a default 404
//! page, and access control driven by the `/admin` route settings.

use std::collections::HashMap;

use axum::{middleware, Router};

use crate::config::AppConfig;
use crate::http::handlers::{
    admin_not_found, handle_admin, handle_web, log_request, not_found_page, web_not_found,
};
use crate::routing::{extra, Engine, FallbackHandler, Middleware, RouteGroup};
use crate::security::{access_control_middleware, AccessControlState};

/// The registered example application.
pub struct DemoApp {
    pub engine: Engine,
    pub admin: RouteGroup,
    pub web: RouteGroup,
    access: AccessControlState,
}

impl DemoApp {
    pub fn build(config: &AppConfig) -> Self {
        let engine = Engine::new();
        engine.set_default_fallback(vec![FallbackHandler::respond(not_found_page)]);

        let admin = engine.group("/admin");
        admin
            .get("/hello", handle_admin)
            .set("Saying Hello", false, false, HashMap::new());
        admin
            .get("/contacts", handle_admin)
            .set("Getting contacts", true, true, HashMap::new());
        admin.get("/article/list", handle_admin).set(
            "Article list",
            true,
            true,
            extra([("showInSitemap", "1"), ("name_en", "Article List")]),
        );
        admin.put("/article/edit/{id}", handle_admin).set(
            "Article editing",
            true,
            true,
            extra([("showInSitemap", "1"), ("name_ja", "記事編集")]),
        );
        admin.delete("/article/del/{id}", handle_admin).set(
            "Article deleting",
            true,
            true,
            extra([("showInSitemap", "0"), ("logPrint", "1")]),
        );
        admin.get("/video/list", handle_admin).set(
            "Video list",
            true,
            true,
            extra([("showInSitemap", "1"), ("logPrint", "0")]),
        );
        admin.put("/video/edit/{id}", handle_admin).set(
            "Video editing",
            true,
            true,
            extra([("showInSitemap", "0"), ("logPrint", "1")]),
        );
        admin.delete("/video/del/{id}", handle_admin).set(
            "Video deleting",
            true,
            true,
            extra([("showInSitemap", "1"), ("logPrint", "1")]),
        );
        admin.register_group_fallback(vec![FallbackHandler::respond(admin_not_found)]);

        let web = engine.group_with("/web", vec![Middleware::from_fn(log_request)]);
        web.get("/about", handle_web)
            .set("About us", false, false, extra([("sitemap", "1")]));
        web.put("/user/account", handle_web)
            .set("Modify account", true, false, HashMap::new());
        web.register_group_fallback(vec![FallbackHandler::respond(web_not_found)]);

        let access = AccessControlState::new(admin.clone(), &config.access);
        Self {
            engine,
            admin,
            web,
            access,
        }
    }

    /// The servable router, access control included.
    pub fn router(&self) -> Router {
        self.engine.router().route_layer(middleware::from_fn_with_state(
            self.access.clone(),
            access_control_middleware,
        ))
    }
}
