//! # Patholab Common Library
//!
//! Shared code for the patholab client libraries:
//! - Error types
//! - API configuration loading

pub mod config;
pub mod error;

pub use config::ApiConfig;
pub use error::{Error, Result};
