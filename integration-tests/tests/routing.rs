//! Route resolution: methods, patterns, parameters and precedence

use funnel::{ConfigurationError, HttpMethod, HttpRequest, Router, RouterFactory, handler_fn};
use serde_json::json;

fn named(name: &'static str) -> impl funnel::Handler + 'static {
    handler_fn(move |ctx, res| {
        res.json(json!({ "handler": name, "route": ctx.route, "params": ctx.params }));
        Ok(())
    })
}

async fn handler_for(router: &Router, method: &str, path: &str) -> Option<String> {
    let envelope = router.dispatch(HttpRequest::new(method, path)).await.ok()?;
    let body: serde_json::Value = serde_json::from_str(&envelope.body).ok()?;
    body["handler"].as_str().map(str::to_string)
}

#[tokio::test]
async fn test_methods_are_routed_separately() {
    let mut factory = RouterFactory::new();
    factory
        .get("/test", named("get"))
        .unwrap()
        .post("/test", named("post"))
        .unwrap()
        .put("/test", named("put"))
        .unwrap()
        .patch("/test", named("patch"))
        .unwrap()
        .delete("/test", named("delete"))
        .unwrap();
    let router = factory.build();

    for method in ["get", "POST", "Put", "patch", "DELETE"] {
        assert_eq!(
            handler_for(&router, method, "/test").await.as_deref(),
            Some(method.to_ascii_lowercase().as_str())
        );
    }
    assert_eq!(handler_for(&router, "options", "/test").await, None);
}

#[tokio::test]
async fn test_param_binds_exactly_one_segment() {
    let mut factory = RouterFactory::new();
    factory.get("/test/:p", named("param")).unwrap();
    let router = factory.build();

    let envelope = router
        .dispatch(HttpRequest::new("get", "/test/123"))
        .await
        .unwrap();
    assert_eq!(
        envelope.body,
        r#"{"handler":"param","route":"/test/:p","params":{"p":"123"}}"#
    );

    assert_eq!(handler_for(&router, "get", "/test").await, None);
    assert_eq!(handler_for(&router, "get", "/test/1/2").await, None);
    assert_eq!(handler_for(&router, "get", "/test/").await, None);
}

#[tokio::test]
async fn test_multiple_params() {
    let mut factory = RouterFactory::new();
    factory
        .get("/users/:user/posts/:post", handler_fn(|ctx, res| {
            res.json(json!({ "user": ctx.param("user"), "post": ctx.param("post") }));
            Ok(())
        }))
        .unwrap();
    let router = factory.build();

    let envelope = router
        .dispatch(HttpRequest::new("get", "users/ada/posts/7"))
        .await
        .unwrap();
    assert_eq!(envelope.body, r#"{"user":"ada","post":"7"}"#);
}

#[tokio::test]
async fn test_first_registered_route_wins() {
    let mut factory = RouterFactory::new();
    factory
        .get("/test/:param1", named("param"))
        .unwrap()
        .get("/test/xyz", named("literal"))
        .unwrap();
    let router = factory.build();
    assert_eq!(handler_for(&router, "get", "/test/xyz").await.as_deref(), Some("param"));

    let mut factory = RouterFactory::new();
    factory
        .get("/test/xyz", named("literal"))
        .unwrap()
        .get("/test/:param1", named("param"))
        .unwrap();
    let router = factory.build();
    assert_eq!(handler_for(&router, "get", "/test/xyz").await.as_deref(), Some("literal"));
    assert_eq!(handler_for(&router, "get", "/test/abc").await.as_deref(), Some("param"));
}

#[tokio::test]
async fn test_catch_all_route() {
    let mut factory = RouterFactory::new();
    factory
        .get("/api/status", named("status"))
        .unwrap()
        .get("/*", named("fallback"))
        .unwrap();
    let router = factory.build();

    assert_eq!(handler_for(&router, "get", "/api/status").await.as_deref(), Some("status"));
    assert_eq!(handler_for(&router, "get", "/").await.as_deref(), Some("fallback"));
    assert_eq!(handler_for(&router, "get", "/a/b/c").await.as_deref(), Some("fallback"));
}

#[tokio::test]
async fn test_trailing_slash_is_significant() {
    let mut factory = RouterFactory::new();
    factory.get("/docs", named("docs")).unwrap();
    let router = factory.build();

    assert_eq!(handler_for(&router, "get", "/docs").await.as_deref(), Some("docs"));
    assert_eq!(handler_for(&router, "get", "/docs/").await, None);
}

#[test]
fn test_registration_errors() {
    let mut factory = RouterFactory::new();
    factory.get("/users/:id", named("a")).unwrap();

    assert_eq!(
        factory.get("/users/:id", named("b")).err(),
        Some(ConfigurationError::DuplicateRoute {
            method: "get".to_string(),
            pattern: "/users/:id".to_string(),
        })
    );
    assert!(matches!(
        factory.get("/files/*/raw", named("c")),
        Err(ConfigurationError::WildcardNotLast { .. })
    ));
    assert!(matches!(
        factory.get("/pairs/:id/:id", named("d")),
        Err(ConfigurationError::DuplicateParam { .. })
    ));

    let router = factory.build();
    assert_eq!(router.routes(), &[(HttpMethod::GET, "/users/:id".to_string())]);
}
