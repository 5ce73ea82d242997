//! Homebuy Core Library
//!
//! Domain models and derivation logic for the home purchase checklist:
//! the static phase/stage catalog, per-transaction task state, progress
//! aggregation, deadline resolution and the user-owned records that hang
//! off the single active transaction.

pub mod catalog;
pub mod deadline;
pub mod error;
pub mod pdf;
pub mod progress;
pub mod records;
pub mod session;
pub mod state;
pub mod task;
pub mod transaction;

pub use error::{HomebuyError, HomebuyResult};
pub use state::AppState;
