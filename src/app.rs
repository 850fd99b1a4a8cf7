use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Application context for dependency injection and shared state.
///
/// Holds the database connection pool and the resolved configuration.
/// Cloning is cheap; every handler receives this via `State<AppContext>`.
#[derive(Clone)]
pub struct AppContext {
    db: DatabaseConnection,
    config: Arc<Config>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Builder pattern for constructing AppContext
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Builder for AppContext with fluent API
#[must_use = "builder does nothing until you call build()"]
pub struct AppContextBuilder {
    db: Option<DatabaseConnection>,
    config: Config,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self {
            db: None,
            config: Config::default(),
        }
    }

    pub fn with_database(mut self, db: DatabaseConnection) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// # Panics
    ///
    /// Panics if no database connection was provided; the context is unusable
    /// without one.
    pub fn build(self) -> AppContext {
        AppContext {
            db: self.db.expect("AppContextBuilder requires a database connection"),
            config: Arc::new(self.config),
        }
    }
}

impl Default for AppContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
