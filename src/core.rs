use crate::{app::AppContext, config::Config, http::RouteModule, middleware::MakeRequestUuid};
use axum::{extract::DefaultBodyLimit, Router};
use std::time::Duration;
use tokio::signal;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Main application structure.
///
/// Route modules register against `Router<AppContext>`; the context is
/// applied once in [`App::serve`] (or [`App::into_test_router`] for tests).
pub struct App {
    router: Router<AppContext>,
    config: Config,
    context: AppContext,
}

impl App {
    pub fn new(context: AppContext, config: Config) -> Self {
        let router = Router::<AppContext>::new()
            .route("/health", axum::routing::get(crate::health::health_handler));
        Self {
            router,
            config,
            context,
        }
    }

    /// Register a route module with the application.
    pub fn register_module<M: RouteModule>(mut self, module: M) -> Self {
        let module_router = module.routes();
        if let Some(prefix) = module.prefix() {
            self.router = self.router.nest(prefix, module_router);
        } else {
            self.router = self.router.merge(module_router);
        }
        self
    }

    /// Get the router with state applied, for testing.
    pub fn into_test_router(self) -> Router {
        self.with_middleware().finish_router()
    }

    fn with_middleware(mut self) -> Self {
        let router = self
            .router
            .layer(DefaultBodyLimit::max(self.config.server.max_body_size))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http());
        self.router = router;
        self
    }

    fn finish_router(self) -> Router {
        self.router.with_state(self.context)
    }

    /// Start the application server with graceful shutdown.
    pub async fn serve(self) -> Result<(), std::io::Error> {
        let addr = self
            .config
            .server
            .addr()
            .expect("Invalid server address in config");

        let app = self.with_middleware();

        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Server starting on http://{}", addr);
        tracing::info!("Health check available at http://{}/health", addr);

        axum::serve(listener, app.finish_router())
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, starting graceful shutdown");
        },
    }

    tokio::time::sleep(Duration::from_secs(1)).await;
    tracing::info!("Shutdown complete");
}
