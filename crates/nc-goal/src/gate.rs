// gate.rs — Calendar checks that decide whether a session may run.
//
// Sessions only run on day 1 of a month, and at most once per day 1.

use chrono::{Datelike, NaiveDate};

use crate::error::GoalError;
use crate::goal::{days_after, Goal};

/// Refuse to run on any day other than the first of the month.
///
/// Checked before the state file is touched.
pub fn check_first_of_month(today: NaiveDate) -> Result<(), GoalError> {
    if today.day() != 1 {
        return Err(GoalError::WrongDay { today });
    }
    Ok(())
}

/// Refuse to run a second session on the same day.
pub fn check_not_already_updated(
    today: NaiveDate,
    last_updated: Option<NaiveDate>,
) -> Result<(), GoalError> {
    if last_updated == Some(today) {
        return Err(GoalError::AlreadyUpdated {
            next_eligible: days_after(today, Goal::GOAL_PERIOD_DAYS),
        });
    }
    Ok(())
}

/// Both checks in order.
pub fn check_date(today: NaiveDate, last_updated: Option<NaiveDate>) -> Result<(), GoalError> {
    check_first_of_month(today)?;
    check_not_already_updated(today, last_updated)
}
