//! Integration tests for elastic-abr

mod controller_properties;
mod measurements;
mod strategies;
