//! SeaORM entities.
//!
//! Every tenant-scoped table carries an `organization_id` column; stores
//! filter on it for each query. Enumerated columns are stored as strings and
//! parsed into the domain enums at the module boundary.

pub mod activity_log;
pub mod audit_log;
pub mod automation_rule;
pub mod client;
pub mod construction_project;
pub mod custom_claim_status;
pub mod document;
pub mod event;
pub mod event_attendee;
pub mod invite;
pub mod material_order;
pub mod member;
pub mod organization;
pub mod task;
pub mod workflow_role;
pub mod workflow_role_member;
