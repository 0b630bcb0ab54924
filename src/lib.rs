//! Timeledger - Bitemporal Money-Transfer Service
//!
//! A transactional transfer engine over a bitemporal balance model:
//! valid time records when a balance holds in the domain, system time
//! records when the system believed it. Every committed transfer splits
//! both parties' timelines at its effective date, so any past observation
//! stays reproducible.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - PostgreSQL connection pool
//! - [`store`] - Typed, transaction-scoped table access
//! - [`transfer`] - The transfer engine (locking, dedupe, timeline splits)
//! - [`query`] - Read-side balance / history lookups
//! - [`gateway`] - HTTP surface

pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod query;
pub mod store;
pub mod transfer;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use query::QueryService;
pub use store::Store;
pub use transfer::{TransferEngine, TransferError, TransferRequest};
