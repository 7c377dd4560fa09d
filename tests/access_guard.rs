//! The example application end to end: settings-driven access control and
//! per-group fallbacks.

use axum::http::{Method, StatusCode};
use axum_route_ext::config::AppConfig;
use axum_route_ext::http::DemoApp;

mod common;

fn app() -> DemoApp {
    DemoApp::build(&AppConfig::default())
}

#[tokio::test]
async fn test_open_route_needs_no_headers() {
    let reply = common::get(app().router(), "/admin/hello").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("hello /admin"));
}

#[tokio::test]
async fn test_missing_user_is_unauthorized() {
    let reply = common::send(app().router(), Method::DELETE, "/admin/article/del/18", &[]).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert!(reply.body.contains("not_sign_in"));
}

#[tokio::test]
async fn test_head_on_guarded_get_route_is_checked() {
    let router = app().router();

    let reply = common::send(router.clone(), Method::HEAD, "/admin/contacts", &[]).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = common::send(
        router.clone(),
        Method::HEAD,
        "/admin/contacts",
        &[("user_id", "10"), ("role_id", "video_auditor")],
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = common::send(router, Method::HEAD, "/admin/hello", &[]).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn test_role_without_permission_is_forbidden() {
    let router = app().router();

    let reply = common::send(
        router.clone(),
        Method::DELETE,
        "/admin/article/del/18",
        &[("user_id", "10")],
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);

    let reply = common::send(
        router,
        Method::DELETE,
        "/admin/article/del/18",
        &[("user_id", "10"), ("role_id", "video_auditor")],
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_permitted_role_passes() {
    let reply = common::send(
        app().router(),
        Method::DELETE,
        "/admin/article/del/18",
        &[("user_id", "10"), ("role_id", "editor")],
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("\"code\":\"API\""));
}

#[tokio::test]
async fn test_auth_only_route_outside_admin_is_not_guarded() {
    let reply = common::send(app().router(), Method::PUT, "/web/user/account", &[]).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("A sample page"));
}

#[tokio::test]
async fn test_wrong_method_gets_admin_not_found() {
    let reply = common::get(app().router(), "/admin/article/del/18").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.contains("404_not_found"));
}

#[tokio::test]
async fn test_group_fallbacks() {
    let router = app().router();

    let reply = common::get(router.clone(), "/admin/nope").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.contains("Path is 404 not found under /admin"));

    let reply = common::get(router.clone(), "/web/nope").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("This API was not found"));

    let reply = common::get(router, "/nothing/here").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.contains("<h1>404 Not Found</h1>"));
}

#[test]
fn test_acl_items_of_admin() {
    let app = app();
    let items = app.admin.acl_items();

    assert_eq!(items.len(), 7);
    assert!(!items.contains_key("GET /admin/hello"));
    assert_eq!(items["PUT /admin/video/edit/{id}"].name, "Video editing");
    assert!(app.web.acl_items().is_empty());
}

#[test]
fn test_routes_map_orders() {
    let app = app();
    let mut orders: Vec<_> = app
        .admin
        .routes_map()
        .values()
        .map(|setting| setting.order)
        .collect();
    orders.sort_unstable();
    assert_eq!(orders, (1..=8).collect::<Vec<_>>());

    let about = app.web.lookup_by_path("GET", "/web/about").unwrap();
    assert_eq!(about.extra("sitemap"), Some("1"));
}
