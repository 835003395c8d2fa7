//! Data-access services over the transport seam

pub mod catalog;
pub mod loader;
pub mod opportunity;

pub use catalog::CatalogService;
pub use loader::{ListLoader, LoadOutcome, PathologistLoader, ResidentLoader};
pub use opportunity::OpportunityService;
