//! Gebeta Routing Library
//!
//! Typed access to the Gebeta Maps routing endpoints:
//! - directions, distance matrix, one-to-many and route optimization
//! - a request client that normalizes provider errors into [`MapError`]
//! - a pluggable [`Transport`] with a `reqwest` implementation

pub mod client;
pub mod sdk;
pub mod service;

#[cfg(test)]
mod testing;

pub use client::{
    HttpTransport, RequestClient, Transport, TransportError, TransportRequest, TransportResponse,
};
pub use gebeta_core::{ClientConfig, GeoPoint, Logger, MapError, NoopLogger, Result, TracingLogger};
pub use reqwest::Method;
pub use sdk::MapSdk;
pub use service::RoutingService;
