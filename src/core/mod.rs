//! Runtime core: the supervision algorithm and its process glue.
//!
//! Internal modules:
//! - [`supervisor`]: runs a group of services to a single termination result;
//! - [`launcher`]: launches one service, recovering panics at the boundary;
//! - [`shutdown`]: cross-platform shutdown signal handling.
//!
//! The only public API from this module is [`Supervisor`].

mod launcher;
mod shutdown;
mod supervisor;

pub use supervisor::Supervisor;
