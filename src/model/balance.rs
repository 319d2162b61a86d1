/// Every employee starts the year with this many vacation days.
pub const ANNUAL_VACATION_DAYS: u32 = 21;

/// Per-employee vacation balance.
///
/// `remaining_days + taken_days` always equals [`ANNUAL_VACATION_DAYS`];
/// [`VacationBalance::take`] is the only mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VacationBalance {
    remaining_days: u32,
    taken_days: u32,
}

impl VacationBalance {
    /// Fresh balance for a new year: nothing taken yet.
    pub fn new() -> Self {
        Self {
            remaining_days: ANNUAL_VACATION_DAYS,
            taken_days: 0,
        }
    }

    pub fn remaining_days(&self) -> u32 {
        self.remaining_days
    }

    pub fn taken_days(&self) -> u32 {
        self.taken_days
    }

    /// Moves `days` from remaining to taken.
    /// Returns `false` and leaves the balance untouched if not enough days remain.
    pub fn take(&mut self, days: u32) -> bool {
        if days > self.remaining_days {
            return false;
        }
        self.remaining_days -= days;
        self.taken_days += days;
        debug_assert_eq!(self.remaining_days + self.taken_days, ANNUAL_VACATION_DAYS);
        true
    }
}

impl Default for VacationBalance {
    fn default() -> Self {
        Self::new()
    }
}
