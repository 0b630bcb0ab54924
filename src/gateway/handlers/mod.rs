//! HTTP handlers

pub mod balance;
pub mod health;
pub mod history;
pub mod transaction;

pub use balance::*;
pub use health::*;
pub use history::*;
pub use transaction::*;
