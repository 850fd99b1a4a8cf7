//! Document metadata attached to clients and construction projects.

mod routes;
mod store;
mod types;

pub use routes::DocumentsModule;
pub use store::{DocumentStore, NewDocument};
pub use types::DocumentType;
