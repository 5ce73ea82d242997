//! The tracked purchase transaction.

pub mod model;

pub use model::{Transaction, TransactionStatus, TransactionUpdate};
