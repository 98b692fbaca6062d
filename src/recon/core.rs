//! Main service orchestrator that ties storage, validation, and the engine

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::recon::{aggregate_events, day_statements, reconcile, summarize};
use crate::traits::*;
use crate::types::*;

/// Reconciliation service coordinating the store, boundary validation, and
/// the pure engine.
///
/// The engine itself is pure and re-run from scratch on every query; the
/// service only loads snapshots from the store and feeds them through the
/// aggregate -> reconcile -> summarize pipeline.
pub struct ReconciliationService<S: EventStore> {
    store: S,
    validator: Box<dyn EventValidator>,
}

impl<S: EventStore> ReconciliationService<S> {
    /// Create a new service with the given storage backend
    pub fn new(store: S) -> Self {
        Self {
            store,
            validator: Box::new(DefaultEventValidator),
        }
    }

    /// Create a new service with a custom boundary validator
    pub fn with_validator(store: S, validator: Box<dyn EventValidator>) -> Self {
        Self { store, validator }
    }

    // Data entry
    /// Record a raw cash event for an employee.
    ///
    /// Malformed input fails fast with a `Validation` error before anything
    /// reaches the store or the engine.
    pub async fn record_event(
        &mut self,
        employee_key: &str,
        date: NaiveDate,
        collection: BigDecimal,
        deposit: BigDecimal,
    ) -> ReconResult<Event> {
        let event = Event::new(employee_key, date, collection, deposit);
        self.validator.validate_event(&event)?;
        self.store.append_event(&event).await?;
        Ok(event)
    }

    /// Save or replace an employee directory entry
    pub async fn register_employee(&mut self, employee: Employee) -> ReconResult<Employee> {
        if employee.key.trim().is_empty() {
            return Err(ReconError::Validation(
                "Employee key cannot be empty".to_string(),
            ));
        }
        self.store.save_employee(&employee).await?;
        Ok(employee)
    }

    /// Get an employee directory entry by key
    pub async fn get_employee(&self, key: &str) -> ReconResult<Option<Employee>> {
        self.store.get_employee(key).await
    }

    /// List all employee directory entries
    pub async fn list_employees(&self) -> ReconResult<Vec<Employee>> {
        self.store.list_employees().await
    }

    // Derived views
    /// The FIFO-reconciled ledger for one employee, oldest first
    pub async fn employee_ledger(&self, employee_key: &str) -> ReconResult<Vec<LedgerRecord>> {
        let events = self.store.list_events(Some(employee_key), None, None).await?;
        let aggregates = aggregate_events(employee_key, &events);
        reconcile(employee_key, &aggregates)
    }

    /// The per-day statement for one employee with running balances
    pub async fn employee_statement(&self, employee_key: &str) -> ReconResult<Vec<DayStatement>> {
        let events = self.store.list_events(Some(employee_key), None, None).await?;
        let aggregates = aggregate_events(employee_key, &events);
        Ok(day_statements(&aggregates))
    }

    /// Totals for one employee; zero events yields the empty summary
    pub async fn employee_summary(&self, employee_key: &str) -> ReconResult<EmployeeSummary> {
        let events = self.store.list_events(Some(employee_key), None, None).await?;
        Ok(summarize(&events))
    }

    /// Detailed payment report: the reconciled ledger for one employee, or
    /// for every employee in key order, with collection/deposit totals and
    /// the net difference.
    pub async fn detailed_report(
        &self,
        employee_key: Option<&str>,
    ) -> ReconResult<DetailedReport> {
        let keys = match employee_key {
            Some(key) => vec![key.to_string()],
            None => self.report_keys().await?,
        };

        let mut records = Vec::new();
        for key in &keys {
            records.extend(self.employee_ledger(key).await?);
        }

        let total_collection: BigDecimal = records.iter().map(|r| &r.collection).sum();
        let total_deposit: BigDecimal = records.iter().map(|r| &r.deposit).sum();
        let net_difference = &total_deposit - &total_collection;

        Ok(DetailedReport {
            records,
            total_collection,
            total_deposit,
            net_difference,
        })
    }

    /// Outstanding report: one summary row per employee plus combined
    /// totals across all of them.
    pub async fn outstanding_report(&self) -> ReconResult<OutstandingReport> {
        let mut rows = Vec::new();
        for key in self.report_keys().await? {
            let summary = self.employee_summary(&key).await?;
            rows.push(OutstandingRow {
                employee_key: key,
                summary,
            });
        }

        let summaries: Vec<EmployeeSummary> =
            rows.iter().map(|row| row.summary.clone()).collect();
        let overall = crate::recon::summary::combine(&summaries);

        Ok(OutstandingReport { rows, overall })
    }

    /// Employees covered by the all-employee reports: the union of the
    /// directory and every key seen on an event, sorted. Registered
    /// employees with no events still get a zero-valued row.
    async fn report_keys(&self) -> ReconResult<Vec<String>> {
        let mut keys: BTreeSet<String> = self
            .store
            .list_employees()
            .await?
            .into_iter()
            .map(|employee| employee.key)
            .collect();
        keys.extend(self.store.list_employee_keys().await?);
        Ok(keys.into_iter().collect())
    }
}
