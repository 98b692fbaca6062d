//! FIFO reconciliation: per-day aggregates matched into a ledger
//!
//! Deposits settle the oldest outstanding collection first, the standard
//! audit convention for difference reporting. Ties are broken purely by
//! chronological order, never by amount.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::{HashMap, VecDeque};

use crate::types::*;

/// Working-set entry for a not-yet-fully-deposited collection.
///
/// Lives only for the duration of one reconciliation run; the queue is FIFO
/// by origin date because aggregates arrive chronologically.
#[derive(Debug)]
struct PendingCollection {
    amount: BigDecimal,
    origin_date: NaiveDate,
}

/// Reconcile one employee's per-day aggregates into an ordered ledger.
///
/// Each day contributes a collection leg (a new open collection record and
/// a pending-queue entry) and a deposit leg (the deposit walks the pending
/// queue oldest-first, clearing collections; a leftover with nothing left
/// to clear becomes a single deposit-only record). A collection record is
/// written exactly once, by the first deposit applied to it; later
/// applications to the same origin only reduce the pending amount.
///
/// Aggregates must arrive strictly ascending by date. The aggregator
/// guarantees this; a duplicate or out-of-order date here would make the
/// date-keyed record lookup ambiguous, so it surfaces as an
/// `InvariantViolation` instead of mutating the wrong record.
///
/// The running balance on each record is cumulative ledger deposits minus
/// collections in output order. When every collection is cleared in a
/// single walk, the final balance equals total deposits minus total
/// collections; a deposit tranche applied to an already-written record
/// drains only the pending amount and never reaches the ledger.
pub fn reconcile(
    employee_key: &str,
    aggregates: &[DayAggregate],
) -> ReconResult<Vec<LedgerRecord>> {
    for pair in aggregates.windows(2) {
        if pair[0].date >= pair[1].date {
            return Err(ReconError::InvariantViolation(format!(
                "Day aggregates for employee '{}' are not strictly ascending: {} then {}",
                employee_key, pair[0].date, pair[1].date
            )));
        }
    }

    let zero = BigDecimal::from(0);
    let mut ledger: Vec<LedgerRecord> = Vec::new();
    let mut pending: VecDeque<PendingCollection> = VecDeque::new();
    // Origin date -> position of the not-yet-cleared collection record, so
    // deposit matching costs O(pending queue) rather than rescanning the
    // ledger per deposit.
    let mut open_records: HashMap<NaiveDate, usize> = HashMap::new();

    for day in aggregates {
        if day.collection > zero {
            pending.push_back(PendingCollection {
                amount: day.collection.clone(),
                origin_date: day.date,
            });
            open_records.insert(day.date, ledger.len());
            ledger.push(LedgerRecord {
                employee_key: employee_key.to_string(),
                collection: day.collection.clone(),
                collection_date: Some(day.date),
                deposit: zero.clone(),
                deposit_date: None,
                difference: zero.clone(),
                running_balance: zero.clone(),
            });
        }

        if day.deposit > zero {
            let mut remaining = day.deposit.clone();

            for entry in pending.iter_mut() {
                if remaining == zero {
                    break;
                }

                let applied = entry.amount.clone().min(remaining.clone());
                if let Some(position) = open_records.remove(&entry.origin_date) {
                    let record = &mut ledger[position];
                    record.deposit = applied.clone();
                    record.deposit_date = Some(day.date);
                    record.difference = &applied - &record.collection;
                }

                entry.amount -= &applied;
                remaining -= &applied;
            }

            pending.retain(|entry| entry.amount > zero);

            if remaining > zero {
                ledger.push(LedgerRecord {
                    employee_key: employee_key.to_string(),
                    collection: zero.clone(),
                    collection_date: None,
                    deposit: remaining.clone(),
                    deposit_date: Some(day.date),
                    difference: remaining,
                    running_balance: zero.clone(),
                });
            }
        }
    }

    let mut balance = zero;
    for record in ledger.iter_mut() {
        balance += &record.deposit - &record.collection;
        record.running_balance = balance.clone();
    }

    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recon::aggregate::aggregate_events;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(d: NaiveDate, collection: i64, deposit: i64) -> DayAggregate {
        DayAggregate {
            employee_key: "EMP001".to_string(),
            date: d,
            collection: BigDecimal::from(collection),
            deposit: BigDecimal::from(deposit),
        }
    }

    #[test]
    fn test_partial_deposit_clears_oldest_collection() {
        // Collections on the 26th and 27th, a 5000 deposit on the 28th
        let aggregates = vec![
            day(date(2025, 3, 26), 10000, 0),
            day(date(2025, 3, 27), 20000, 0),
            day(date(2025, 3, 28), 0, 5000),
        ];

        let ledger = reconcile("EMP001", &aggregates).unwrap();

        assert_eq!(ledger.len(), 2);

        assert_eq!(ledger[0].collection, BigDecimal::from(10000));
        assert_eq!(ledger[0].collection_date, Some(date(2025, 3, 26)));
        assert_eq!(ledger[0].deposit, BigDecimal::from(5000));
        assert_eq!(ledger[0].deposit_date, Some(date(2025, 3, 28)));
        assert_eq!(ledger[0].difference, BigDecimal::from(-5000));

        assert_eq!(ledger[1].collection, BigDecimal::from(20000));
        assert_eq!(ledger[1].collection_date, Some(date(2025, 3, 27)));
        assert_eq!(ledger[1].deposit, BigDecimal::from(0));
        assert_eq!(ledger[1].deposit_date, None);
        assert_eq!(ledger[1].difference, BigDecimal::from(0));

        assert_eq!(ledger[1].running_balance, BigDecimal::from(-25000));
    }

    #[test]
    fn test_fifo_order_clears_oldest_not_best_fit() {
        // A 10000 deposit exactly matches the second collection by amount,
        // but FIFO still applies it to the first one
        let aggregates = vec![
            day(date(2025, 3, 24), 15000, 0),
            day(date(2025, 3, 25), 10000, 0),
            day(date(2025, 3, 26), 0, 10000),
        ];

        let ledger = reconcile("EMP001", &aggregates).unwrap();

        assert_eq!(ledger[0].deposit, BigDecimal::from(10000));
        assert_eq!(ledger[0].deposit_date, Some(date(2025, 3, 26)));
        assert_eq!(ledger[1].deposit, BigDecimal::from(0));
        assert_eq!(ledger[1].deposit_date, None);
    }

    #[test]
    fn test_oversized_deposit_leaves_one_leftover_record() {
        let aggregates = vec![
            day(date(2025, 3, 24), 8000, 0),
            day(date(2025, 3, 25), 3000, 0),
            day(date(2025, 3, 26), 0, 15000),
        ];

        let ledger = reconcile("EMP001", &aggregates).unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger[0].deposit, BigDecimal::from(8000));
        assert_eq!(ledger[0].difference, BigDecimal::from(0));
        assert_eq!(ledger[1].deposit, BigDecimal::from(3000));

        // The 4000 remainder lands in exactly one deposit-only record
        assert_eq!(ledger[2].collection, BigDecimal::from(0));
        assert_eq!(ledger[2].collection_date, None);
        assert_eq!(ledger[2].deposit, BigDecimal::from(4000));
        assert_eq!(ledger[2].deposit_date, Some(date(2025, 3, 26)));
        assert_eq!(ledger[2].difference, BigDecimal::from(4000));

        assert_eq!(ledger[2].running_balance, BigDecimal::from(4000));
    }

    #[test]
    fn test_deposit_with_no_pending_collection() {
        let aggregates = vec![day(date(2025, 3, 26), 0, 6000)];

        let ledger = reconcile("EMP001", &aggregates).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].collection_date, None);
        assert_eq!(ledger[0].deposit, BigDecimal::from(6000));
        assert_eq!(ledger[0].difference, BigDecimal::from(6000));
        assert_eq!(ledger[0].running_balance, BigDecimal::from(6000));
    }

    #[test]
    fn test_same_day_collection_and_deposit() {
        // The collection leg runs before the deposit leg, so a same-day
        // deposit can clear that day's own collection
        let aggregates = vec![
            day(date(2025, 3, 25), 15000, 0),
            day(date(2025, 3, 26), 12000, 15000),
        ];

        let ledger = reconcile("EMP001", &aggregates).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].deposit, BigDecimal::from(15000));
        assert_eq!(ledger[0].deposit_date, Some(date(2025, 3, 26)));
        assert_eq!(ledger[1].collection, BigDecimal::from(12000));
        assert_eq!(ledger[1].deposit, BigDecimal::from(0));
    }

    #[test]
    fn test_collection_record_is_written_only_once() {
        // 4000 of 10000 cleared on the 27th; the final 6000 on the 28th
        // only drains the pending queue, the record keeps its first deposit
        let aggregates = vec![
            day(date(2025, 3, 26), 10000, 0),
            day(date(2025, 3, 27), 0, 4000),
            day(date(2025, 3, 28), 0, 6000),
        ];

        let ledger = reconcile("EMP001", &aggregates).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].deposit, BigDecimal::from(4000));
        assert_eq!(ledger[0].deposit_date, Some(date(2025, 3, 27)));
        assert_eq!(ledger[0].difference, BigDecimal::from(-6000));
    }

    #[test]
    fn test_running_balance_identity() {
        // Each deposit clears whole collections, so every amount reaches the
        // ledger and the final balance is total deposits minus collections
        let aggregates = vec![
            day(date(2025, 3, 26), 10000, 0),
            day(date(2025, 3, 27), 20000, 0),
            day(date(2025, 3, 28), 0, 10000),
            day(date(2025, 3, 29), 0, 20000),
            day(date(2025, 3, 30), 0, 5000),
        ];

        let ledger = reconcile("EMP001", &aggregates).unwrap();

        assert_eq!(ledger[0].running_balance, BigDecimal::from(0));
        assert_eq!(ledger[1].running_balance, BigDecimal::from(0));

        // 35000 deposited against 30000 collected
        let last = ledger.last().unwrap();
        assert_eq!(last.running_balance, BigDecimal::from(5000));
    }

    #[test]
    fn test_running_balance_after_multi_tranche_clear() {
        // The 7000 and 8000 tranches land on collections whose records were
        // already written, so only their first-walk amounts reach the
        // ledger: 5000 + 2000 applied, plus the 5000 leftover on the 31st
        let aggregates = vec![
            day(date(2025, 3, 26), 10000, 0),
            day(date(2025, 3, 27), 20000, 0),
            day(date(2025, 3, 28), 0, 5000),
            day(date(2025, 3, 29), 0, 7000),
            day(date(2025, 3, 30), 0, 8000),
            day(date(2025, 3, 31), 0, 15000),
        ];

        let ledger = reconcile("EMP001", &aggregates).unwrap();

        let ledger_deposit: BigDecimal = ledger.iter().map(|r| &r.deposit).sum();
        assert_eq!(ledger_deposit, BigDecimal::from(12000));

        let last = ledger.last().unwrap();
        assert_eq!(last.running_balance, BigDecimal::from(-18000));
    }

    #[test]
    fn test_conservation_through_aggregation_and_reconciliation() {
        let events = vec![
            Event::new(
                "EMP001",
                date(2025, 3, 25),
                BigDecimal::from(15000),
                BigDecimal::from(0),
            ),
            Event::new(
                "EMP001",
                date(2025, 3, 26),
                BigDecimal::from(12000),
                BigDecimal::from(15000),
            ),
            Event::new(
                "EMP001",
                date(2025, 3, 27),
                BigDecimal::from(0),
                BigDecimal::from(12000),
            ),
        ];

        let aggregates = aggregate_events("EMP001", &events);
        let ledger = reconcile("EMP001", &aggregates).unwrap();

        let ledger_collection: BigDecimal = ledger.iter().map(|r| &r.collection).sum();
        let ledger_deposit: BigDecimal = ledger.iter().map(|r| &r.deposit).sum();

        assert_eq!(ledger_collection, BigDecimal::from(27000));
        assert_eq!(ledger_deposit, BigDecimal::from(27000));
    }

    #[test]
    fn test_unsorted_aggregates_are_rejected() {
        let aggregates = vec![
            day(date(2025, 3, 27), 10000, 0),
            day(date(2025, 3, 26), 5000, 0),
        ];

        let result = reconcile("EMP001", &aggregates);
        assert!(matches!(result, Err(ReconError::InvariantViolation(_))));
    }

    #[test]
    fn test_duplicate_dates_are_rejected() {
        // Cannot happen through the aggregator; rejected if it is bypassed
        let aggregates = vec![
            day(date(2025, 3, 26), 10000, 0),
            day(date(2025, 3, 26), 5000, 0),
        ];

        let result = reconcile("EMP001", &aggregates);
        assert!(matches!(result, Err(ReconError::InvariantViolation(_))));
    }

    #[test]
    fn test_empty_input_yields_empty_ledger() {
        let ledger = reconcile("EMP001", &[]).unwrap();
        assert!(ledger.is_empty());
    }
}
