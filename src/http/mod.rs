//! HTTP helpers: response wrappers, pagination, and route module composition.

mod query;
mod response;
mod routes;

pub use query::PaginationQuery;
pub use response::{
    ApiResponse, CreatedResponse, NoContentResponse, PaginatedData, PaginationMeta,
};
pub use routes::RouteModule;
