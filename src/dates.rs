//! Days-back offsets relative to the current local date.

use crate::error::SolarError;
use chrono::{Local, NaiveDate, TimeDelta};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `today` shifted by `offset` days; negative offsets go back in time.
pub fn days_back(today: NaiveDate, offset: i64) -> Result<NaiveDate, SolarError> {
    TimeDelta::try_days(offset)
        .and_then(|delta| today.checked_add_signed(delta))
        .ok_or(SolarError::DateOutOfRange(offset))
}
