//! Team tasks: manual CRUD plus the records materialized by automation
//! rules.

mod routes;
mod store;
mod types;

pub use routes::TasksModule;
pub use store::{NewTask, TaskStore, UpdateTask};
pub use types::{TaskCategory, TaskPriority, TaskStatus};
