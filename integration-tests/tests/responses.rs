//! Response finalization as seen through a full dispatch

use funnel::{HttpRequest, RouterConfig, RouterFactory, handler_fn};
use serde_json::json;

#[tokio::test]
async fn test_envelope_serializes_for_the_platform() {
    let mut factory = RouterFactory::new();
    factory
        .get("/ok", handler_fn(|_ctx, res| {
            res.json(json!({ "ok": true }));
            Ok(())
        }))
        .unwrap();
    let router = factory.build();

    let envelope = router.dispatch(HttpRequest::new("get", "/ok")).await.unwrap();
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "headers": { "content-type": "application/json" },
            "statusCode": 200,
            "body": "{\"ok\":true}",
            "isBase64Encoded": false,
        })
    );
}

#[tokio::test]
async fn test_response_helpers() {
    let mut factory = RouterFactory::new();
    factory
        .get("/page", handler_fn(|_ctx, res| {
            res.html("<h1>hi</h1>");
            Ok(())
        }))
        .unwrap()
        .get("/text", handler_fn(|_ctx, res| {
            res.content_type("text/plain").json(json!("plain words"));
            Ok(())
        }))
        .unwrap()
        .get("/old", handler_fn(|_ctx, res| {
            res.redirect("/new");
            Ok(())
        }))
        .unwrap()
        .get("/image", handler_fn(|_ctx, res| {
            res.content_type("image/png").send_binary(vec![0x89u8, 0x50, 0x4e, 0x47]);
            Ok(())
        }))
        .unwrap();
    let router = factory.build();

    let page = router.dispatch(HttpRequest::new("get", "/page")).await.unwrap();
    assert_eq!(page.header("content-type"), Some("text/html"));
    assert_eq!(page.body, "<h1>hi</h1>");

    let text = router.dispatch(HttpRequest::new("get", "/text")).await.unwrap();
    assert_eq!(text.header("content-type"), Some("text/plain"));
    assert_eq!(text.body, "plain words");

    let old = router.dispatch(HttpRequest::new("get", "/old")).await.unwrap();
    assert_eq!(old.status_code, 302);
    assert_eq!(old.header("location"), Some("/new"));

    let image = router.dispatch(HttpRequest::new("get", "/image")).await.unwrap();
    assert!(image.is_base64_encoded);
    assert_eq!(image.body, "iVBORw==");
    assert_eq!(image.header("content-type"), Some("image/png"));
}

#[tokio::test]
async fn test_configured_default_content_type() {
    let config = RouterConfig::new()
        .with_version("v2")
        .with_default_content_type("text/plain; charset=utf-8");
    let mut factory = RouterFactory::with_config(config).unwrap();
    factory
        .get("/raw", handler_fn(|_ctx, res| {
            res.send("hello");
            Ok(())
        }))
        .unwrap();
    let router = factory.build();

    let envelope = router.dispatch(HttpRequest::new("get", "/raw")).await.unwrap();
    assert_eq!(envelope.header("content-type"), Some("text/plain; charset=utf-8"));
    assert_eq!(envelope.body, "hello");
    assert_eq!(router.version(), "v2");
}

#[tokio::test]
async fn test_request_headers_and_query_string() {
    let mut factory = RouterFactory::new();
    factory
        .get("/search", handler_fn(|ctx, res| {
            res.json(json!({
                "q": ctx.query_value("q"),
                "page": ctx.query_value("page"),
                "agent": ctx.header("User-Agent"),
            }));
            Ok(())
        }))
        .unwrap();
    let router = factory.build();

    let request = HttpRequest::new("get", "/search")
        .with_query_string("?q=rust+routers&page=2")
        .unwrap()
        .with_header("USER-AGENT", "curl/8");
    let envelope = router.dispatch(request).await.unwrap();
    assert_eq!(envelope.body, r#"{"q":"rust routers","page":"2","agent":"curl/8"}"#);
}
