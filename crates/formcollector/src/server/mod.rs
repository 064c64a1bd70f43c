//! HTTP server for the contact preference form.
//!
//! Routes:
//!
//! | Method | Path                 | Response                                      |
//! |--------|----------------------|-----------------------------------------------|
//! | GET    | `/`                  | the form                                      |
//! | POST   | `/submit`            | 400 with the form and errors, or 302 onwards  |
//! | GET    | `/success?id=<n>`    | the confirmation, or 302 back to `/`          |
//! | GET    | `/admin/submissions` | every submission as JSON (no authentication)  |
//! | GET    | `/assets/*`          | govuk-frontend files                          |
//! | GET    | `/public/*`          | local static files                            |

mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::{MemoryStore, SubmissionStore};
use crate::validation::ContactValidator;
use crate::views::{TemplateRenderer, ViewRenderer};

pub use handlers::SuccessQuery;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where submissions are kept.
    pub store: Arc<dyn SubmissionStore>,
    /// Turns views into HTML.
    pub renderer: Arc<dyn ViewRenderer>,
    /// Checks submitted forms.
    pub validator: Arc<ContactValidator>,
}

impl AppState {
    /// Assemble state from its parts.
    #[must_use]
    pub fn new(store: Arc<dyn SubmissionStore>, renderer: Arc<dyn ViewRenderer>) -> Self {
        Self {
            store,
            renderer,
            validator: Arc::new(ContactValidator::new()),
        }
    }

    /// State with an empty in-memory store and the configured templates.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to parse.
    pub fn from_config(config: &Config) -> Result<Self> {
        let renderer = TemplateRenderer::with_template_dir(config.views.template_dir.as_deref())?;
        Ok(Self::new(Arc::new(MemoryStore::new()), Arc::new(renderer)))
    }
}

/// Router with the form, confirmation and debug listing routes.
#[must_use]
pub fn build_router(state: AppState, listing_enabled: bool) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::form_handler))
        .route("/submit", post(handlers::submit_handler))
        .route("/success", get(handlers::success_handler));

    if listing_enabled {
        router = router.route("/admin/submissions", get(handlers::submissions_handler));
    }

    router.with_state(state)
}

/// The full application: routes, static files and request tracing.
#[must_use]
pub fn app(state: AppState, config: &Config) -> Router {
    // Fonts and images first, then the compiled CSS and JS
    let assets = ServeDir::new(config.govuk_assets_dir())
        .fallback(ServeDir::new(&config.static_files.govuk_frontend_dir));
    let public = ServeDir::new(&config.static_files.public_dir);

    build_router(state, config.admin.listing_enabled)
        .nest_service("/assets", assets)
        .nest_service("/public", public)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.socket_addr()?;

    if config.admin.listing_enabled {
        warn!("GET /admin/submissions is enabled and has no authentication");
    }

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;
    let port = listener.local_addr()?.port();
    info!("Listening on http://localhost:{port}");

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("Could not install signal handlers, falling back to Ctrl-C");
                wait_for_ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    wait_for_ctrl_c().await;

    info!("Shutdown signal received, draining connections");
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn wait_for_ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "Could not listen for Ctrl-C, shutdown needs an external kill");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_listing_disabled_is_not_routed() {
        let router = build_router(test_state(), false);
        let response = router
            .oneshot(
                Request::get("/admin/submissions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_shutdown_signal_waits_for_a_signal() {
        let waited =
            tokio::time::timeout(std::time::Duration::from_millis(50), shutdown_signal()).await;
        assert!(waited.is_err());

        let waited =
            tokio::time::timeout(std::time::Duration::from_millis(50), wait_for_ctrl_c()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_default_public_dir_serves_stylesheet() {
        let response = app(test_state(), &Config::default())
            .oneshot(Request::get("/public/app.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_dir_is_served() {
        let dir = std::env::temp_dir().join(format!("formcollector_public_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("hello.txt"), "hello").unwrap();

        let mut config = Config::default();
        config.static_files.public_dir = dir.clone();

        let response = app(test_state(), &config)
            .oneshot(Request::get("/public/hello.txt").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"hello");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_assets_fall_back_to_frontend_root() {
        let root = std::env::temp_dir().join(format!("formcollector_govuk_{}", std::process::id()));
        std::fs::create_dir_all(root.join("assets/fonts")).unwrap();
        std::fs::write(root.join("assets/fonts/light.woff2"), "font").unwrap();
        std::fs::write(root.join("govuk-frontend.min.css"), "body{}").unwrap();

        let mut config = Config::default();
        config.static_files.govuk_frontend_dir = root.clone();
        let app = app(test_state(), &config);

        let font = app
            .clone()
            .oneshot(Request::get("/assets/fonts/light.woff2").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(font.status(), StatusCode::OK);

        let css = app
            .clone()
            .oneshot(Request::get("/assets/govuk-frontend.min.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(css.status(), StatusCode::OK);

        let missing = app
            .oneshot(Request::get("/assets/nope.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let _ = std::fs::remove_dir_all(&root);
    }
}
