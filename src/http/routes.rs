use crate::app::AppContext;
use axum::Router;

/// Trait for composable route modules
///
/// Each feature module registers its own routes and is composed into the
/// main application by [`App::register_module`](crate::App::register_module).
///
/// The returned router should NOT have state applied - state is applied by
/// the App once all modules are merged. Handlers access shared state via
/// `State<AppContext>`.
pub trait RouteModule {
    /// Returns a router with all routes for this module
    fn routes(&self) -> Router<AppContext>
    where
        Self: Sized;

    /// Optional: specify a path prefix for all routes in this module
    fn prefix(&self) -> Option<&str> {
        None
    }
}
