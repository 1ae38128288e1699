//! Gebeta Core Library
//!
//! This library provides core functionality for the Gebeta Maps client including:
//! - Configuration management
//! - Input validation
//! - Error taxonomy, logging capability and shared types

pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod logging;
pub mod validation;

// Re-export commonly used types
pub use config::model::ClientConfig;
pub use error::{MapError, Result};
pub use geo::GeoPoint;
pub use logging::{Logger, NoopLogger, TracingLogger};
pub use validation::Validator;
