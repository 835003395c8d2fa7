//! # Patholab Data-Access Library
//!
//! Client-side retrieval and normalization layer for the pathology lab
//! backend:
//! - Endpoint resolution per resource type (`endpoints`)
//! - Canonical record normalization across backend schema generations
//!   (`normalize`, `models`)
//! - Directory search and full-listing retrieval (`services::catalog`)
//! - In-flight deduplication of full-list loads (`services::loader`)
//! - Opportunity report aggregation (`services::opportunity`)
//!
//! All network access goes through the [`transport::Transport`] seam; wire a
//! [`transport::HttpTransport`] for production or any stub for tests.

pub mod endpoints;
pub mod models;
pub mod normalize;
pub mod services;
pub mod transport;

pub use endpoints::ResourceType;
pub use patholab_common::{ApiConfig, Error, Result};
pub use services::{
    CatalogService, ListLoader, LoadOutcome, OpportunityService, PathologistLoader, ResidentLoader,
};
pub use transport::{HttpTransport, Transport, TransportError};
