use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::balance::VacationBalance;

pub type EmployeeId = i64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Not enough vacation days remaining: requested {requested}, remaining {remaining}")]
    InsufficientDays { requested: i64, remaining: u32 },
}

/// Whole days covered by `start..=end`, both ends included.
/// A reversed range gives zero or a negative count.
pub fn days_requested(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// In-memory vacation ledger keyed by employee id.
///
/// Shared between workers through `web::Data`; each operation holds the lock
/// for its full check-then-update sequence.
pub struct Ledger {
    balances: Mutex<HashMap<EmployeeId, VacationBalance>>,
}

impl Ledger {
    /// Builds a ledger with a fresh balance for each seeded employee.
    pub fn new(employee_ids: impl IntoIterator<Item = EmployeeId>) -> Self {
        let balances = employee_ids
            .into_iter()
            .map(|id| (id, VacationBalance::new()))
            .collect();
        Self {
            balances: Mutex::new(balances),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EmployeeId, VacationBalance>> {
        // A panic elsewhere cannot leave a balance half-updated, so the map is still valid.
        self.balances.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn balance(&self, employee_id: EmployeeId) -> Result<VacationBalance, LedgerError> {
        self.lock()
            .get(&employee_id)
            .copied()
            .ok_or(LedgerError::EmployeeNotFound(employee_id))
    }

    /// Books `start..=end` against the employee's remaining days.
    ///
    /// On success returns the number of days booked. On any error the ledger
    /// is left untouched.
    pub fn request_days(
        &self,
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u32, LedgerError> {
        let mut balances = self.lock();
        let balance = balances
            .get_mut(&employee_id)
            .ok_or(LedgerError::EmployeeNotFound(employee_id))?;

        let requested = days_requested(start, end);
        if requested < 1 {
            return Err(LedgerError::InvalidDateRange { start, end });
        }

        let insufficient = LedgerError::InsufficientDays {
            requested,
            remaining: balance.remaining_days(),
        };
        let days = u32::try_from(requested).map_err(|_| insufficient.clone())?;
        if !balance.take(days) {
            return Err(insufficient);
        }

        tracing::info!(
            employee_id,
            days,
            remaining_days = balance.remaining_days(),
            taken_days = balance.taken_days(),
            "Vacation days booked"
        );
        Ok(days)
    }

    pub fn employee_count(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::balance::ANNUAL_VACATION_DAYS;
    use std::sync::Arc;
    use std::thread;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn assert_invariant(ledger: &Ledger, id: EmployeeId) {
        let b = ledger.balance(id).unwrap();
        assert_eq!(b.remaining_days() + b.taken_days(), ANNUAL_VACATION_DAYS);
    }

    #[test]
    fn day_count_is_inclusive() {
        assert_eq!(days_requested(date("2024-01-01"), date("2024-01-01")), 1);
        assert_eq!(days_requested(date("2024-01-01"), date("2024-01-07")), 7);
        assert_eq!(days_requested(date("2024-02-28"), date("2024-03-01")), 3);
        assert_eq!(days_requested(date("2024-01-07"), date("2024-01-01")), -5);
    }

    #[test]
    fn seeded_employees_start_with_full_balance() {
        let ledger = Ledger::new([1, 2]);
        assert_eq!(ledger.employee_count(), 2);
        for id in [1, 2] {
            let b = ledger.balance(id).unwrap();
            assert_eq!((b.remaining_days(), b.taken_days()), (21, 0));
        }
    }

    #[test]
    fn unknown_employee_is_not_found() {
        let ledger = Ledger::new([1, 2]);
        assert_eq!(ledger.balance(3), Err(LedgerError::EmployeeNotFound(3)));
        assert_eq!(
            ledger.request_days(3, date("2024-01-01"), date("2024-01-01")),
            Err(LedgerError::EmployeeNotFound(3))
        );
    }

    #[test]
    fn successful_request_moves_exactly_n_days() {
        let ledger = Ledger::new([1]);
        let days = ledger
            .request_days(1, date("2024-01-01"), date("2024-01-07"))
            .unwrap();
        assert_eq!(days, 7);

        let b = ledger.balance(1).unwrap();
        assert_eq!((b.remaining_days(), b.taken_days()), (14, 7));
        assert_invariant(&ledger, 1);
    }

    #[test]
    fn over_budget_request_leaves_ledger_unchanged() {
        let ledger = Ledger::new([2]);
        let err = ledger
            .request_days(2, date("2024-03-01"), date("2024-03-22"))
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientDays {
                requested: 22,
                remaining: 21
            }
        );

        let b = ledger.balance(2).unwrap();
        assert_eq!((b.remaining_days(), b.taken_days()), (21, 0));
    }

    #[test]
    fn exact_remaining_balance_can_be_taken() {
        let ledger = Ledger::new([1]);
        ledger
            .request_days(1, date("2024-01-01"), date("2024-01-14"))
            .unwrap();
        ledger
            .request_days(1, date("2024-06-01"), date("2024-06-07"))
            .unwrap();
        assert_eq!(ledger.balance(1).unwrap().remaining_days(), 0);
        assert!(matches!(
            ledger.request_days(1, date("2024-07-01"), date("2024-07-01")),
            Err(LedgerError::InsufficientDays { requested: 1, remaining: 0 })
        ));
        assert_invariant(&ledger, 1);
    }

    #[test]
    fn reversed_range_is_rejected_without_crediting_days() {
        let ledger = Ledger::new([1]);
        let err = ledger
            .request_days(1, date("2024-01-07"), date("2024-01-01"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDateRange { .. }));

        let b = ledger.balance(1).unwrap();
        assert_eq!((b.remaining_days(), b.taken_days()), (21, 0));
    }

    #[test]
    fn huge_range_is_insufficient() {
        let ledger = Ledger::new([1]);
        let err = ledger
            .request_days(1, NaiveDate::MIN, NaiveDate::MAX)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientDays { remaining: 21, .. }));
        assert_invariant(&ledger, 1);
    }

    #[test]
    fn concurrent_requests_never_overbook() {
        let ledger = Arc::new(Ledger::new([1]));
        // 8 threads each try to book 5 days; only 4 can succeed out of 21.
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    ledger
                        .request_days(1, date("2024-05-01"), date("2024-05-05"))
                        .is_ok()
                })
            })
            .collect();

        let booked = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(booked, 4);

        let b = ledger.balance(1).unwrap();
        assert_eq!((b.remaining_days(), b.taken_days()), (1, 20));
    }
}
