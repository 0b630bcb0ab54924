//! Read-side lookups against the bitemporal tables

pub mod service;

pub use service::{QueryError, QueryService};
