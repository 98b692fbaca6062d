//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Storage abstraction for the reconciliation system
///
/// This trait allows the engine to work with any storage backend (a local
/// in-memory snapshot, a file, a remote database, etc.) by implementing
/// these methods. The engine assumes read-after-write consistency: events
/// returned by `list_events` always reflect every `append_event` that has
/// resolved.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append a new event; events are never updated or deleted
    async fn append_event(&mut self, event: &Event) -> ReconResult<()>;

    /// List events, optionally filtered by employee and date range.
    ///
    /// No ordering is guaranteed; the engine does not depend on one.
    async fn list_events(
        &self,
        employee_key: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ReconResult<Vec<Event>>;

    /// Distinct employee keys that have at least one event, sorted
    async fn list_employee_keys(&self) -> ReconResult<Vec<String>>;

    /// Save or replace a directory entry for an employee
    async fn save_employee(&mut self, employee: &Employee) -> ReconResult<()>;

    /// Get a directory entry by key
    async fn get_employee(&self, key: &str) -> ReconResult<Option<Employee>>;

    /// List all directory entries, sorted by key
    async fn list_employees(&self) -> ReconResult<Vec<Employee>>;
}

/// Trait for implementing custom event validation rules at the boundary
pub trait EventValidator: Send + Sync {
    /// Validate an event before it is appended to the store
    fn validate_event(&self, event: &Event) -> ReconResult<()>;
}

/// Default event validator with the engine's contract rules
///
/// Amounts must be non-negative and the employee key non-empty. All-zero
/// events pass here (the aggregator skips them); stricter entry rules live
/// in `utils::validation::EnhancedEventValidator`.
pub struct DefaultEventValidator;

impl EventValidator for DefaultEventValidator {
    fn validate_event(&self, event: &Event) -> ReconResult<()> {
        if event.employee_key.trim().is_empty() {
            return Err(ReconError::Validation(
                "Employee key cannot be empty".to_string(),
            ));
        }

        let zero = BigDecimal::from(0);
        if event.collection < zero {
            return Err(ReconError::Validation(format!(
                "Collection amount cannot be negative: {}",
                event.collection
            )));
        }
        if event.deposit < zero {
            return Err(ReconError::Validation(format!(
                "Deposit amount cannot be negative: {}",
                event.deposit
            )));
        }

        Ok(())
    }
}

/// One row of the outstanding report: an employee and their totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutstandingRow {
    /// Employee the row belongs to
    pub employee_key: String,
    /// Totals derived from the employee's raw events
    pub summary: EmployeeSummary,
}

/// Outstanding report across all employees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutstandingReport {
    /// One row per employee, sorted by key
    pub rows: Vec<OutstandingRow>,
    /// Combined totals across every row
    pub overall: EmployeeSummary,
}

/// Detailed payment report: the FIFO-matched ledger with totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    /// Reconciled ledger records, grouped per employee in key order
    pub records: Vec<LedgerRecord>,
    /// Sum of collection amounts across the records
    pub total_collection: BigDecimal,
    /// Sum of deposit amounts across the records
    pub total_deposit: BigDecimal,
    /// Total deposit minus total collection
    pub net_difference: BigDecimal,
}
