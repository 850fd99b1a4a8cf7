//! Activity logs: the client timeline, and the trigger point for workflow
//! automation.

mod routes;
mod store;
mod types;

pub use routes::ActivityModule;
pub use store::{ActivityStore, NewActivityLog};
pub use types::ActivityType;
