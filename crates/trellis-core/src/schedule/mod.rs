//! Care-window evaluator.
//!
//! Decides whether "today" falls inside a recurring annual window expressed
//! as `dd-MM` month-day bounds with no year. Windows may wrap the year
//! boundary (November through February); comparison happens in a normalized
//! non-leap calendar.
//!
//! Every failure mode degrades to `false`: an unset window, a malformed
//! bound, an out-of-range day. Nothing here returns an error.

pub mod upcoming;

pub use upcoming::{UpcomingTask, sowing_open, upcoming_tasks};

use chrono::{Datelike, NaiveDate};

pub use trellis_db::models::{CareStep, DateRange};

/// Days per month in the normalized non-leap calendar. `29-02` is treated
/// as malformed.
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A year-free calendar position, ordered by month then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// Parse a `dd-MM` string. Returns `None` for anything malformed:
    /// missing separator, non-numeric parts, month outside 1-12, day
    /// outside the month's non-leap length.
    pub fn parse(s: &str) -> Option<Self> {
        let (day, month) = s.split_once('-')?;
        let day: u32 = day.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        if day == 0 || day > DAYS_IN_MONTH[(month - 1) as usize] {
            return None;
        }
        Some(Self { month, day })
    }

    /// Reduce a full date to its month-day position, discarding the year.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

/// True when `today` falls inside the recurring window `range`.
///
/// Non-wrapping windows are inclusive on both ends. Wrapping windows
/// (start after end) are exclusive at `start` and inclusive at `end`; that
/// asymmetry matches the behavior existing schedule data was authored
/// against and is kept as-is.
///
/// Unset or malformed bounds yield `false`.
pub fn is_upcoming(range: &DateRange, today: NaiveDate) -> bool {
    if range.is_unset() {
        return false;
    }
    let (Some(start), Some(end)) = (MonthDay::parse(&range.start), MonthDay::parse(&range.end))
    else {
        return false;
    };
    let today = MonthDay::from_date(today);

    if start > end {
        // Wrapping: the window covers end-of-year through start-of-year.
        today < end || today > start || today == end
    } else {
        start <= today && today <= end
    }
}
