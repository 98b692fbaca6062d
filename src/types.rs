//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single raw cash event reported for an employee on a calendar date.
///
/// An event may carry a collection, a deposit, or both; either amount may be
/// absent on the wire and defaults to zero. Events are immutable once
/// recorded; the engine derives everything else from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for the event
    pub id: Uuid,
    /// Opaque key identifying the employee the event belongs to
    pub employee_key: String,
    /// Calendar date the cash moved
    pub date: NaiveDate,
    /// Cash collected in the field on this date
    #[serde(default)]
    pub collection: BigDecimal,
    /// Cash banked on this date
    #[serde(default)]
    pub deposit: BigDecimal,
    /// When the event was recorded
    pub created_at: NaiveDateTime,
}

impl Event {
    /// Create a new event with a fresh identifier
    pub fn new(
        employee_key: impl Into<String>,
        date: NaiveDate,
        collection: BigDecimal,
        deposit: BigDecimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_key: employee_key.into(),
            date,
            collection,
            deposit,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// An event with zero in both amounts carries no information
    pub fn is_empty(&self) -> bool {
        let zero = BigDecimal::from(0);
        self.collection == zero && self.deposit == zero
    }
}

/// Per-day totals for one employee, derived by summing same-day events.
///
/// For a given employee, dates are unique after aggregation; the reconciler
/// depends on that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    /// Employee the totals belong to
    pub employee_key: String,
    /// Calendar date
    pub date: NaiveDate,
    /// Total collected across all events on this date
    pub collection: BigDecimal,
    /// Total deposited across all events on this date
    pub deposit: BigDecimal,
}

/// One reconciled ledger line pairing a collection with the deposit that
/// cleared it, or carrying an unmatched leftover deposit.
///
/// A record originates either from a collection (deposit fields empty until
/// a later deposit clears it) or from a deposit with no outstanding
/// collection left to clear (collection fields empty). A collection-origin
/// record is mutated exactly once, by the first deposit applied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Employee the record belongs to
    pub employee_key: String,
    /// Collection amount, zero for deposit-only records
    pub collection: BigDecimal,
    /// Date the collection was taken, if this is a collection-origin record
    pub collection_date: Option<NaiveDate>,
    /// Deposit amount applied to this record
    pub deposit: BigDecimal,
    /// Date the deposit was banked, once one has been applied
    pub deposit_date: Option<NaiveDate>,
    /// Applied deposit minus collection; positive means overpaid
    pub difference: BigDecimal,
    /// Cumulative deposits minus collections through this record
    pub running_balance: BigDecimal,
}

/// Simple per-day audit line: the day's totals with the net difference and
/// the running balance through that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStatement {
    /// Calendar date
    pub date: NaiveDate,
    /// Total collected on this date
    pub collection: BigDecimal,
    /// Total deposited on this date
    pub deposit: BigDecimal,
    /// Deposit minus collection for the day
    pub difference: BigDecimal,
    /// Cumulative deposits minus collections through this day
    pub running_balance: BigDecimal,
}

/// Totals for one employee, derived purely from raw events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Sum of all collection amounts
    pub total_collection: BigDecimal,
    /// Sum of all deposit amounts
    pub total_deposit: BigDecimal,
    /// Collections not yet matched by deposits
    pub outstanding: BigDecimal,
    /// Most recent date with a nonzero collection or deposit
    pub last_transaction_date: Option<NaiveDate>,
}

/// Directory entry for an employee.
///
/// Pure store-level decoration for reports and data entry; the engine only
/// ever sees the opaque key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque key used on events
    pub key: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Department the employee belongs to
    pub department: String,
}

impl Employee {
    /// Create a new directory entry
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }
}

/// Errors that can occur in the reconciliation system
#[derive(Debug, thiserror::Error)]
pub enum ReconError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type for reconciliation operations
pub type ReconResult<T> = Result<T, ReconError>;
