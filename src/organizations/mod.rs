//! Organizations: tenants, members with roles, invitations, and seats.

mod invites;
pub mod plans;
mod routes;
mod seats;
mod store;
mod types;

pub use invites::{InviteManager, IssuedInvite};
pub use plans::{PlanTier, SubscriptionState};
pub use routes::OrganizationsModule;
pub use seats::{PlanSeats, SeatChecker, UnlimitedSeats};
pub use store::{NewMember, NewOrganization, OrgStore};
pub use types::MemberRole;
