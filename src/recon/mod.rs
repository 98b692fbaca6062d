//! Reconciliation engine: aggregation, FIFO matching, and summary rollups

pub mod aggregate;
pub mod core;
pub mod reconcile;
pub mod summary;

pub use aggregate::*;
pub use reconcile::*;
pub use self::core::*;
pub use summary::*;
