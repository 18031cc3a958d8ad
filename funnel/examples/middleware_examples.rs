//! Example middleware implementations
//!
//! Run with `RUST_LOG=debug cargo run --example middleware_examples` to see the router's own
//! registration and resolution events alongside the example logger.

use funnel::{
    BoxError, HttpRequest, Middleware, MiddlewareResult, Next, RequestContext, ResponseBuilder,
    RouterFactory, async_trait, handler_fn,
};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

// LOGGER MIDDLEWARE

/// Logs every request that reaches the pipeline
pub struct LoggerMiddleware {
    pub log_body: bool,
}

impl LoggerMiddleware {
    pub fn new() -> Self {
        Self { log_body: false }
    }

    pub fn with_body_logging(mut self) -> Self {
        self.log_body = true;
        self
    }
}

impl Default for LoggerMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for LoggerMiddleware {
    async fn handle(
        &self,
        ctx: &mut RequestContext,
        _res: &mut ResponseBuilder,
        next: Next,
    ) -> MiddlewareResult {
        if self.log_body {
            info!(method = %ctx.method, path = %ctx.path, body = %ctx.body, "request");
        } else {
            info!(method = %ctx.method, path = %ctx.path, "request");
        }
        Ok(next.advance())
    }
}

// CORS MIDDLEWARE

/// Adds CORS headers to whatever response the handler produces
pub struct CorsMiddleware {
    pub allowed_origin: String,
    pub allowed_methods: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsMiddleware {
    pub fn new() -> Self {
        Self {
            allowed_origin: "*".to_string(),
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allow_credentials: false,
        }
    }

    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origin = origin.into();
        self
    }

    pub fn allow_credentials(mut self, allow: bool) -> Self {
        self.allow_credentials = allow;
        self
    }
}

impl Default for CorsMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for CorsMiddleware {
    async fn handle(
        &self,
        _ctx: &mut RequestContext,
        res: &mut ResponseBuilder,
        next: Next,
    ) -> MiddlewareResult {
        res.header("Access-Control-Allow-Origin", self.allowed_origin.clone())
            .header("Access-Control-Allow-Methods", self.allowed_methods.join(", "));
        if self.allow_credentials {
            res.header("Access-Control-Allow-Credentials", "true");
        }
        Ok(next.advance())
    }
}

// AUTH MIDDLEWARE

#[derive(Debug, thiserror::Error)]
#[error("missing or malformed {header} header")]
pub struct Unauthorized {
    header: String,
}

/// Checks for a bearer token and exposes it to later stages as `token`
pub struct AuthMiddleware {
    pub header_name: String,
    pub prefix: String,
}

impl AuthMiddleware {
    pub fn new() -> Self {
        Self {
            header_name: "Authorization".to_string(),
            prefix: "Bearer ".to_string(),
        }
    }
}

impl Default for AuthMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(
        &self,
        ctx: &mut RequestContext,
        _res: &mut ResponseBuilder,
        next: Next,
    ) -> MiddlewareResult {
        let token = ctx
            .header(&self.header_name)
            .and_then(|value| value.strip_prefix(self.prefix.as_str()))
            .map(str::to_string)
            .ok_or_else(|| Unauthorized {
                header: self.header_name.clone(),
            })?;

        ctx.set("token", token);
        Ok(next.advance())
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut factory = RouterFactory::new();
    factory
        .use_middleware(LoggerMiddleware::new().with_body_logging())
        .use_middleware(CorsMiddleware::new().allow_origin("https://example.com"));
    factory.use_middleware_for("/account/*", AuthMiddleware::new())?;

    factory.get("/health", handler_fn(|_ctx, res| {
        res.json(json!({ "status": "ok" }));
        Ok(())
    }))?;
    factory.get("/account/profile", handler_fn(|ctx, res| {
        res.json(json!({ "token": ctx.get("token") }));
        Ok(())
    }))?;

    let router = factory.build();

    let health = router.dispatch(HttpRequest::new("GET", "/health")).await?;
    println!("{}", serde_json::to_string_pretty(&health)?);

    let profile = router
        .dispatch(HttpRequest::new("GET", "/account/profile").with_header("Authorization", "Bearer abc"))
        .await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);

    match router.dispatch(HttpRequest::new("GET", "/account/profile")).await {
        Ok(envelope) => println!("unexpected success: {:?}", envelope),
        Err(e) => println!("rejected: {}", e),
    }

    Ok(())
}
