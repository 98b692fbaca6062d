//! Event aggregation: raw events grouped into per-day totals

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::types::*;

/// Aggregate one employee's events into per-day totals, sorted ascending by
/// date.
///
/// Events for other employees are ignored, as are all-zero events. Same-day
/// events have their collection and deposit amounts summed independently,
/// so each date appears at most once in the output; dates whose events were
/// all filtered out are omitted entirely. Pure and deterministic for a
/// given input multiset, regardless of input order.
pub fn aggregate_events(employee_key: &str, events: &[Event]) -> Vec<DayAggregate> {
    let zero = BigDecimal::from(0);
    let mut days: BTreeMap<NaiveDate, (BigDecimal, BigDecimal)> = BTreeMap::new();

    for event in events {
        if event.employee_key != employee_key || event.is_empty() {
            continue;
        }

        let totals = days
            .entry(event.date)
            .or_insert_with(|| (zero.clone(), zero.clone()));
        totals.0 += &event.collection;
        totals.1 += &event.deposit;
    }

    days.into_iter()
        .map(|(date, (collection, deposit))| DayAggregate {
            employee_key: employee_key.to_string(),
            date,
            collection,
            deposit,
        })
        .collect()
}
