//! Month calendar projection.
//!
//! Projects a month of events onto the fixed 6x7 grid (Sunday-first)
//! that booking staff read: every cell carries the events dated that
//! day plus a per-(venue, slot) occupancy flag, so a glance answers
//! "what is still free on the 14th?".

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::{DateSort, EventFilter, EventRepository, RepositoryError};
use crate::models::{Event, TimeSlot, Venue};

/// Result type for calendar projection.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Error type for calendar projection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}

/// Error type for the storage-backed month view.
#[derive(Debug, thiserror::Error)]
pub enum MonthViewError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell {
    /// Day of month, or `None` for padding cells outside the month.
    pub day: Option<u32>,
    /// Events dated this day, in repository order.
    pub events: Vec<Event>,
    /// Occupancy per (venue, slot). Padding cells carry an empty map.
    pub occupancy: BTreeMap<(Venue, TimeSlot), bool>,
}

impl CalendarCell {
    fn out_of_month() -> Self {
        Self {
            day: None,
            events: Vec::new(),
            occupancy: BTreeMap::new(),
        }
    }

    /// Is this (venue, slot) taken on this day?
    pub fn is_occupied(&self, venue: Venue, slot: TimeSlot) -> bool {
        self.occupancy
            .get(&(venue, slot))
            .copied()
            .unwrap_or(false)
    }
}

/// A projected month: always 6 weeks of 7 cells.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub weeks: Vec<Vec<CalendarCell>>,
}

/// Project events onto the 6x7 grid for the given month.
///
/// Events dated outside the month are ignored rather than rejected, so
/// a caller can pass an unfiltered slice. Only the events given here
/// contribute to occupancy; callers decide whether terminal events
/// belong in the view.
pub fn project_month(year: i32, month: u32, events: &[Event]) -> CalendarResult<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;
    let days_in_month = days_in_month(year, month);

    // Sunday-first weekday index of the 1st; the grid walker starts at
    // 1 - first_weekday so leading cells land before day 1.
    let first_weekday = first.weekday().num_days_from_sunday() as i64;
    let mut current_day: i64 = 1 - first_weekday;

    let mut weeks = Vec::with_capacity(6);
    for _ in 0..6 {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            if current_day < 1 || current_day > days_in_month as i64 {
                week.push(CalendarCell::out_of_month());
            } else {
                let day = current_day as u32;
                let day_events: Vec<Event> = events
                    .iter()
                    .filter(|e| {
                        e.event_date.year() == year
                            && e.event_date.month() == month
                            && e.event_date.day() == day
                    })
                    .cloned()
                    .collect();

                let mut occupancy = BTreeMap::new();
                for venue in Venue::ALL {
                    for slot in TimeSlot::ALL {
                        let taken = day_events.iter().any(|e| {
                            e.event_time == slot && e.event_venues.contains(&venue)
                        });
                        occupancy.insert((venue, slot), taken);
                    }
                }

                week.push(CalendarCell {
                    day: Some(day),
                    events: day_events,
                    occupancy,
                });
            }
            current_day += 1;
        }
        weeks.push(week);
    }

    Ok(MonthGrid {
        year,
        month,
        month_name: MONTH_NAMES[(month - 1) as usize],
        weeks,
    })
}

/// Storage-backed month view: active (non-terminal) events only.
pub async fn month_view(
    repo: &Arc<dyn EventRepository>,
    year: i32,
    month: u32,
) -> Result<MonthGrid, MonthViewError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { year, month }.into());
    }
    let filter = EventFilter::new()
        .non_terminal()
        .in_month(year, month)
        .sorted(DateSort::Ascending);
    let events = repo.find(&filter).await?;
    Ok(project_month(year, month, &events)?)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        // Day before the 1st of the next month.
        Some(first_of_next) => first_of_next.pred_opt().map(|d| d.day()).unwrap_or(31),
        None => 31,
    }
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;
