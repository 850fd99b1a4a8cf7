//! Construction pipeline: projects, roof measurements, and the
//! material-order generator seeded from estimate extractions.

mod routes;
pub mod scope;
mod store;
mod types;

pub use routes::ConstructionModule;
pub use scope::generate_material_order;
pub use store::{ConstructionStore, NewProject, UpdateProject};
pub use types::{
    EstimateExtraction, MaterialItem, PermitStatus, ProjectStatus, RoofMeasurements,
};
