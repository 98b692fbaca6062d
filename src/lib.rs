//! # Reconciliation Core
//!
//! A reconciliation library for field cash collections: it tracks cash
//! collected by employees against cash later deposited, and derives a
//! chronologically ordered, FIFO-matched ledger with running balances and
//! outstanding totals.
//!
//! ## Features
//!
//! - **Event aggregation**: Unordered per-transaction events merged into
//!   per-day collection/deposit totals per employee
//! - **FIFO reconciliation**: Deposits settle the oldest outstanding
//!   collection first, producing a pairing ledger with differences
//! - **Running balances**: Cumulative deposits-minus-collections on every
//!   ledger record
//! - **Reporting**: Per-employee statements, detailed payment reports, and
//!   an all-employees outstanding report
//! - **Storage abstraction**: Backend-agnostic design with trait-based
//!   storage and configuration-selected implementations
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{MemoryStore, ReconciliationService};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # async fn demo() -> reconciliation_core::ReconResult<()> {
//! let mut service = ReconciliationService::new(MemoryStore::new());
//! service
//!     .record_event(
//!         "EMP001",
//!         NaiveDate::from_ymd_opt(2025, 3, 26).unwrap(),
//!         BigDecimal::from(10000),
//!         BigDecimal::from(0),
//!     )
//!     .await?;
//! let ledger = service.employee_ledger("EMP001").await?;
//! assert_eq!(ledger.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod recon;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use recon::*;
pub use traits::*;
pub use types::*;
pub use utils::{JsonFileStore, MemoryStore, Store, StoreConfig};
