//! Wiring of services and ports into a running client.

pub mod runtime;

pub use runtime::{ClientRuntime, RuntimeError, RuntimePorts};
