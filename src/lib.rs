//! Claimdeck - a multi-tenant CRM backend for insurance-claim public
//! adjusters.
//!
//! Built on Axum and SeaORM: organizations with role-based members, seats
//! and invitations; client/claim tracking with generated case ids; activity
//! logs that drive workflow task automation; calendar events; documents;
//! and the construction pipeline with its material-order generator.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use claimdeck::{App, AppContext, ConfigBuilder};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     claimdeck::init_tracing();
//!
//!     let config = ConfigBuilder::new().from_env().build()?;
//!     let db = claimdeck::database::connect(&config.database).await?;
//!     let context = AppContext::new(db, config.clone());
//!
//!     claimdeck::build_app(context, config).serve().await?;
//!     Ok(())
//! }
//! ```

pub mod activity;
mod app;
pub mod audit;
pub mod clients;
mod config;
pub mod construction;
mod core;
pub mod database;
pub mod documents;
mod error;
pub mod entities;
pub mod events;
pub mod health;
mod http;
mod middleware;
pub mod organizations;
pub mod tasks;
pub mod testing;
pub mod validation;
pub mod workflow;

// Re-exports for the public API
pub use app::{AppContext, AppContextBuilder};
pub use config::{Config, ConfigBuilder, LoggingConfig, ServerConfig};
pub use self::core::App;
pub use error::{AppError, Result};
pub use http::{
    ApiResponse, CreatedResponse, NoContentResponse, PaginatedData, PaginationMeta,
    PaginationQuery, RouteModule,
};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the application with every route module registered.
pub fn build_app(context: AppContext, config: Config) -> App {
    App::new(context, config)
        .register_module(organizations::OrganizationsModule)
        .register_module(clients::ClientsModule)
        .register_module(activity::ActivityModule)
        .register_module(workflow::WorkflowModule)
        .register_module(construction::ConstructionModule)
        .register_module(documents::DocumentsModule)
        .register_module(events::EventsModule)
        .register_module(tasks::TasksModule)
        .register_module(audit::AuditModule)
}

/// Initialize tracing/logging with sensible defaults
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,claimdeck=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize tracing with a specific filter level
pub fn init_tracing_with_filter(filter: &str) {
    let env_filter = EnvFilter::new(filter);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
