//! Workflow automation: roles, rules, and the matcher that turns activity
//! logs into tasks.

pub mod matcher;
mod routes;
mod store;

pub use matcher::{TaskSeed, plan_tasks};
pub use routes::WorkflowModule;
pub use store::{NewRule, NewRole, UpdateRule, UpdateRole, WorkflowStore};
