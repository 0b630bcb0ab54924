//! Persistence layer: typed, transaction-scoped access to the bitemporal tables
//!
//! - [`models`] - Row types for `users`, `balances`, `transaction_history`
//! - [`schema`] - Schema bootstrap and demo seed
//! - [`repository`] - The [`Store`]: locking, timeline writes, as-of reads

pub mod models;
pub mod repository;
pub mod schema;

pub use models::{open_ended, Balance, HistoryEntry, NewHistoryEntry};
pub use repository::{is_unique_violation, Store, StoreTx};
