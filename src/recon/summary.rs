//! Summary rollups over raw events and the per-day statement view

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::types::*;

/// Roll one employee's raw events up into totals.
///
/// Independent of the ledger: sums run over the raw events directly.
/// All-zero events do not count, including toward the last transaction
/// date. No events yields the zero-valued summary with no last date.
pub fn summarize(events: &[Event]) -> EmployeeSummary {
    let mut total_collection = BigDecimal::from(0);
    let mut total_deposit = BigDecimal::from(0);
    let mut last_transaction_date: Option<NaiveDate> = None;

    for event in events {
        if event.is_empty() {
            continue;
        }

        total_collection += &event.collection;
        total_deposit += &event.deposit;
        last_transaction_date = match last_transaction_date {
            Some(latest) if latest >= event.date => Some(latest),
            _ => Some(event.date),
        };
    }

    let outstanding = &total_collection - &total_deposit;
    EmployeeSummary {
        total_collection,
        total_deposit,
        outstanding,
        last_transaction_date,
    }
}

/// Combine per-employee summaries into an all-employees summary
pub fn combine(summaries: &[EmployeeSummary]) -> EmployeeSummary {
    let mut overall = EmployeeSummary::default();

    for summary in summaries {
        overall.total_collection += &summary.total_collection;
        overall.total_deposit += &summary.total_deposit;
        overall.outstanding += &summary.outstanding;
        overall.last_transaction_date = match (overall.last_transaction_date, summary.last_transaction_date)
        {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    overall
}

/// Derive the per-day statement lines from an employee's day aggregates.
///
/// Each line carries the day's net difference (deposit minus collection)
/// and the running balance through that day.
pub fn day_statements(aggregates: &[DayAggregate]) -> Vec<DayStatement> {
    let mut running_balance = BigDecimal::from(0);

    aggregates
        .iter()
        .map(|day| {
            let difference = &day.deposit - &day.collection;
            running_balance += &difference;
            DayStatement {
                date: day.date,
                collection: day.collection.clone(),
                deposit: day.deposit.clone(),
                difference,
                running_balance: running_balance.clone(),
            }
        })
        .collect()
}
