// Common fixtures and utilities for integration tests

pub mod host;

pub use fixtures::*;
pub use host::*;
