//! Data Transfer Objects for the HTTP API.
//!
//! Domain types already derive Serialize/Deserialize and go over the
//! wire as-is; this module adds the request envelopes, query parameter
//! shapes, and the flattened calendar response.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Event, EventRef, EventStatus, NewEvent, TimeSlot, Venue};
use crate::services::{CalendarCell, MonthGrid};

/// Request body for creating a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// Initial status: `booked` (default) or `reserved`.
    #[serde(default = "default_status")]
    pub status: EventStatus,
    #[serde(flatten)]
    pub event: NewEvent,
}

fn default_status() -> EventStatus {
    EventStatus::Booked
}

/// Request body for cancelling an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    pub reason: String,
}

/// Query parameters for the event listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EventListQuery {
    /// Filter by status.
    #[serde(default)]
    pub status: Option<EventStatus>,
    /// Restrict to active (non-terminal) events.
    #[serde(default)]
    pub active: Option<bool>,
    /// Filter by (year, month); both or neither.
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    /// Filter by exact date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Filter by time slot.
    #[serde(default)]
    pub time: Option<TimeSlot>,
    /// Filter by venue membership.
    #[serde(default)]
    pub venue: Option<Venue>,
    /// Filter by exact client name.
    #[serde(default)]
    pub client: Option<String>,
    /// Sort order: `asc` (default) or `desc` by event date.
    #[serde(default)]
    pub sort: Option<String>,
}

/// Event list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<Event>,
    pub total: usize,
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityParams {
    pub date: NaiveDate,
    pub time: TimeSlot,
    /// Comma-separated venue labels, e.g. `Garden,Sunroom`.
    pub venues: String,
    /// Event id to exclude (when pre-checking a reschedule).
    #[serde(default)]
    pub exclude: Option<i64>,
}

/// Availability answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicting: Option<EventRef>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub database: String,
}

/// One (venue, slot) occupancy flag in a calendar cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyDto {
    pub venue: Venue,
    pub slot: TimeSlot,
    pub occupied: bool,
}

/// One cell of the calendar response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarCellDto {
    /// Day of month; `null` for padding cells.
    pub day: Option<u32>,
    pub events: Vec<Event>,
    pub occupancy: Vec<OccupancyDto>,
}

impl From<CalendarCell> for CalendarCellDto {
    fn from(cell: CalendarCell) -> Self {
        let occupancy = cell
            .occupancy
            .into_iter()
            .map(|((venue, slot), occupied)| OccupancyDto {
                venue,
                slot,
                occupied,
            })
            .collect();
        Self {
            day: cell.day,
            events: cell.events,
            occupancy,
        }
    }
}

/// Month calendar response: always 6 weeks of 7 cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthGridDto {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub weeks: Vec<Vec<CalendarCellDto>>,
}

impl From<MonthGrid> for MonthGridDto {
    fn from(grid: MonthGrid) -> Self {
        Self {
            year: grid.year,
            month: grid.month,
            month_name: grid.month_name.to_string(),
            weeks: grid
                .weeks
                .into_iter()
                .map(|week| week.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}
