//! Mapping between plan period blocks and the days of a displayed month.
//!
//! Every block covers seven consecutive days starting at day one of the month, whatever
//! the month. The mapping is recomputed for each displayed month and never stored.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{CalendarError, DayKey, PeriodBlock, Plan};

pub const DAYS_PER_BLOCK: u32 = 7;

/// Years representable by `time::Date`.
pub const MIN_YEAR: i32 = -9999;
pub const MAX_YEAR: i32 = 9999;

/// A calendar month with a zero-based month index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    year: i32,
    month: u8,
}

#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u8,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = CalendarError;

    fn try_from(value: RawYearMonth) -> Result<Self, Self::Error> {
        YearMonth::new(value.year, value.month)
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u8) -> Result<Self, CalendarError> {
        if month > 11 {
            return Err(CalendarError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year));
        }

        Ok(Self { year, month })
    }

    pub(crate) fn from_parts(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()) - 1,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    pub fn month(&self) -> u8 {
        self.month
    }

    fn calendar_month(&self) -> Month {
        Month::try_from(self.month + 1).unwrap_or(Month::January)
    }

    pub fn days_in_month(&self) -> u8 {
        time::util::days_in_year_month(self.year, self.calendar_month())
    }

    /// Weekday of day one, Sunday = 0.
    pub fn first_weekday(&self) -> u8 {
        Date::from_calendar_date(self.year, self.calendar_month(), 1)
            .map(|date| date.weekday().number_days_from_sunday())
            .unwrap_or(0)
    }

    /// Month before this one. January of `MIN_YEAR` has none and returns itself.
    pub fn previous(&self) -> Self {
        match self.month {
            0 if self.year == MIN_YEAR => *self,
            0 => Self {
                year: self.year - 1,
                month: 11,
            },
            month => Self {
                year: self.year,
                month: month - 1,
            },
        }
    }

    /// Month after this one. December of `MAX_YEAR` has none and returns itself.
    pub fn next(&self) -> Self {
        match self.month {
            11 if self.year == MAX_YEAR => *self,
            11 => Self {
                year: self.year + 1,
                month: 0,
            },
            month => Self {
                year: self.year,
                month: month + 1,
            },
        }
    }

    /// Key of day `day` in this month, absent when the month has no such day.
    pub fn day(&self, day: u8) -> Option<DayKey> {
        if day == 0 || day > self.days_in_month() {
            return None;
        }

        Some(DayKey::from_parts(self.year, self.month, day))
    }

    pub fn days(&self) -> impl Iterator<Item = DayKey> + '_ {
        (1..=self.days_in_month()).filter_map(|day| self.day(day))
    }
}

/// Days of a month covered by the block at `block_index`, truncated at the end of the
/// month. `None` when the block starts after the last day.
pub fn day_range(block_index: usize, days_in_month: u8) -> Option<RangeInclusive<u8>> {
    let days_in_month = u32::from(days_in_month);
    let index = u32::try_from(block_index).ok()?;
    let start = index.checked_mul(DAYS_PER_BLOCK)?.checked_add(1)?;

    if start > days_in_month {
        return None;
    }

    let end = (start + DAYS_PER_BLOCK - 1).min(days_in_month);

    Some(start as u8..=end as u8)
}

/// Index of the block owning the 1-based day `day`.
pub fn block_index_for_day(day: u8) -> Option<usize> {
    if day == 0 {
        return None;
    }

    Some(((u32::from(day) - 1) / DAYS_PER_BLOCK) as usize)
}

/// Block owning `day`, or `None` when the plan has no content for it.
pub fn block_for_day(plan: &Plan, day: u8) -> Option<&PeriodBlock> {
    block_index_for_day(day).and_then(|index| plan.block(index))
}
