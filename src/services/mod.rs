//! Service abstractions.
//!
//! This module provides the service-facing types:
//! - [`Service`] — trait for implementing async, cancelable services
//! - [`ServiceFn`] — closure-backed service implementation
//! - [`ServiceRef`] — shared handle to a service (`Arc<dyn Service>`)

mod service;
mod service_fn;

pub use service::{Service, ServiceRef};
pub use service_fn::ServiceFn;
